//! Static template and payload corpora used across harnesses.
//!
//! Templates are real-world message shapes from a CMS system log; payloads
//! are serialized exactly as that system stores them.

/// The canonical four-value record message.
pub const RECORD_INSERTED: &str = "Record '%s' (%s) was inserted on page '%s' (%s)";

/// Payload for [`RECORD_INSERTED`].
pub const RECORD_INSERTED_PAYLOAD: &str = r#"a:4:{i:0;s:21:"Legal compliance Docs";i:1;s:15:"tx_dam_cat:9930";i:2;s:5:"Media";i:3;s:1:"1";}"#;

/// Expected rendering of [`RECORD_INSERTED`] with its payload.
pub const RECORD_INSERTED_RENDERED: &str =
    "Record 'Legal compliance Docs' (tx_dam_cat:9930) was inserted on page 'Media' (1)";

/// Templates that contain verbs, each paired with a matching payload.
pub const CORPUS_TEMPLATES: &[(&str, &str)] = &[
    (RECORD_INSERTED, RECORD_INSERTED_PAYLOAD),
    (
        "User %s logged in from %s (%s)",
        r#"a:3:{i:0;s:5:"admin";i:1;s:9:"10.0.0.17";i:2;s:7:"backend";}"#,
    ),
    (
        "Attempt to modify record '%s' (%s) without permission. Or non-existing page.",
        r#"a:2:{i:0;s:4:"Home";i:1;s:7:"pages:1";}"#,
    ),
    (
        "[scheduler]: Task failed to execute successfully. Class: %s, UID: %d. %s",
        r#"a:3:{i:0;s:24:"Vendor\Tasks\CleanupTask";i:1;i:12;i:2;s:17:"Lock wait timeout";}"#,
    ),
    (
        "Login-attempt from %s (%s), username '%s', password not accepted!",
        r#"a:3:{i:0;s:11:"192.168.0.4";i:1;s:0:"";i:2;s:5:"guest";}"#,
    ),
    (
        "Moved %d records in %.2f seconds",
        r#"a:2:{i:0;i:42;i:1;d:1.25;}"#,
    ),
];

/// Templates with no verbs at all.
pub const CORPUS_PLAIN: &[&str] = &[
    "Cache cleared",
    "Regular string",
    "",
    "Scheduler run finished without errors",
];

/// Payloads that the decoder must reject.
pub const CORPUS_UNDECODABLE: &[&str] = &[
    "",
    "garbage",
    "a:2:{i:0;N;}",
    "s:10:\"short\";",
    "i:1;i:2;",
    "a:1:{d:1.5;N;}",
];

/// Payloads that decode fine but are not arrays.
pub const CORPUS_SCALAR: &[&str] = &["N;", "i:3;", "s:3:\"abc\";", "b:1;", "d:0.5;"];
