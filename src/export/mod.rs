//! JSON export of finished session records.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::ExportError;
use crate::session::SessionRecord;

/// Writes one record as pretty-printed JSON under `output_dir`.
///
/// The directory is created on first use. Filenames combine the agent
/// fingerprint with the session id, so reruns of the same configuration
/// never clobber each other.
pub fn write_record(output_dir: &Path, record: &SessionRecord) -> Result<PathBuf, ExportError> {
    fs::create_dir_all(output_dir).map_err(|source| ExportError::CreateDir {
        path: output_dir.to_path_buf(),
        source,
    })?;

    let path = output_dir.join(format!("{}_{}.json", record.fingerprint, record.session_id));
    let json = serde_json::to_string_pretty(record)?;
    fs::write(&path, json).map_err(|source| ExportError::WriteFailed {
        path: path.clone(),
        source,
    })?;

    info!(path = %path.display(), "wrote session record");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::ScriptedProvider;
    use crate::profile::ForcedProfile;
    use crate::session::{run_session, SessionConfig};

    #[tokio::test]
    async fn test_write_record_round_trips_key_fields() {
        let provider = ScriptedProvider::new(Vec::new()).with_fallback("ok");
        let config = SessionConfig {
            model: "test-model".to_string(),
            skip_background: true,
            ..SessionConfig::default()
        };
        let record = run_session(&provider, 3, &ForcedProfile::default(), &config)
            .await
            .unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = write_record(dir.path(), &record).unwrap();
        assert!(path.exists());

        let text = fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["seed"], 3);
        assert_eq!(value["fingerprint"], record.fingerprint.as_str());
        assert!(value["transcript"].as_array().unwrap().len() > 1);
        assert_eq!(
            value["asked_question_order"].as_array().unwrap().len(),
            9
        );
    }

    #[tokio::test]
    async fn test_unwritable_output_dir_is_a_create_dir_error() {
        let provider = ScriptedProvider::new(Vec::new()).with_fallback("ok");
        let config = SessionConfig {
            model: "test-model".to_string(),
            skip_background: true,
            ..SessionConfig::default()
        };
        let record = run_session(&provider, 3, &ForcedProfile::default(), &config)
            .await
            .unwrap();

        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "x").unwrap();

        let err = write_record(&blocker, &record).unwrap_err();
        assert!(matches!(err, ExportError::CreateDir { .. }));
        // The offending path is carried in the message.
        assert!(err.to_string().contains(blocker.display().to_string().as_str()));
    }
}
