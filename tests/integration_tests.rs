use anyhow::Result;
use async_trait::async_trait;
use customer_import::domain::ports::CustomerRepository;
use customer_import::{
    CustomerDraft, FailurePolicy, FileType, HeaderPolicy, HttpCustomerRepository, ImportCommand,
    ImportError, LocalRoot, RowStatus, SaveError, SavedCustomer,
};
use httpmock::prelude::*;
use std::sync::Arc;
use tempfile::TempDir;
use tokio::sync::Mutex;

#[derive(Clone, Default)]
struct MockRepository {
    saved: Arc<Mutex<Vec<CustomerDraft>>>,
    reject_email: Option<String>,
}

impl MockRepository {
    fn rejecting(email: &str) -> Self {
        Self {
            reject_email: Some(email.to_string()),
            ..Self::default()
        }
    }

    async fn saved(&self) -> Vec<CustomerDraft> {
        self.saved.lock().await.clone()
    }
}

#[async_trait]
impl CustomerRepository for MockRepository {
    async fn save(&self, draft: &CustomerDraft) -> std::result::Result<SavedCustomer, SaveError> {
        if self.reject_email.as_deref() == Some(draft.email.as_str()) {
            return Err(SaveError::Input(format!("Email {} is already taken", draft.email)));
        }
        let mut saved = self.saved.lock().await;
        saved.push(draft.clone());
        Ok(SavedCustomer {
            id: Some(saved.len() as u64),
            email: draft.email.clone(),
        })
    }
}

fn draft(first_name: &str, last_name: &str, email: &str) -> CustomerDraft {
    CustomerDraft {
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        email: email.to_string(),
    }
}

/// Root directory with `var/import/<name>` containing `content`.
fn root_with(name: &str, content: &str) -> Result<TempDir> {
    let root = TempDir::new()?;
    let dir = root.path().join("var/import");
    std::fs::create_dir_all(&dir)?;
    std::fs::write(dir.join(name), content)?;
    Ok(root)
}

fn command(root: &TempDir, repository: MockRepository) -> ImportCommand<MockRepository, LocalRoot> {
    ImportCommand::new(
        LocalRoot::new(root.path().to_string_lossy()),
        repository,
        HeaderPolicy::FirstRow,
        FailurePolicy::Abort,
    )
}

#[tokio::test]
async fn test_csv_header_is_never_submitted() -> Result<()> {
    let root = root_with(
        "customers.csv",
        "fname,lname,emailaddress\nJane,Doe,jane@example.com\n",
    )?;
    let repository = MockRepository::default();

    let summary = command(&root, repository.clone())
        .execute("default", "var/import/customers.csv")
        .await?;

    assert_eq!(repository.saved().await, vec![draft("Jane", "Doe", "jane@example.com")]);
    assert_eq!(summary.file_type, FileType::Csv);
    assert_eq!(summary.created, 1);
    assert_eq!(summary.skipped, 0);
    Ok(())
}

#[tokio::test]
async fn test_txt_rows_are_split_on_commas() -> Result<()> {
    let root = root_with(
        "customers.TXT",
        "fname,lname,emailaddress\nJohn,Smith,john@example.com\n",
    )?;
    let repository = MockRepository::default();

    command(&root, repository.clone())
        .execute("default", "var/import/customers.TXT")
        .await?;

    assert_eq!(repository.saved().await, vec![draft("John", "Smith", "john@example.com")]);
    Ok(())
}

#[tokio::test]
async fn test_json_row_with_empty_email_is_skipped() -> Result<()> {
    let root = root_with(
        "customers.json",
        r#"[
            {"fname": "Jane", "lname": "Doe", "emailaddress": "jane@example.com"},
            {"fname": "John", "lname": "Smith", "emailaddress": ""},
            {"fname": "Ann", "lname": "Lee", "emailaddress": "ann@example.com"}
        ]"#,
    )?;
    let repository = MockRepository::default();

    let summary = command(&root, repository.clone())
        .execute("default", "var/import/customers.json")
        .await?;

    assert_eq!(
        repository.saved().await,
        vec![
            draft("Jane", "Doe", "jane@example.com"),
            draft("Ann", "Lee", "ann@example.com"),
        ]
    );
    assert_eq!(summary.skipped, 1);
    assert_eq!(
        summary.outcomes[1].status,
        RowStatus::Skipped { missing: vec!["emailaddress"] }
    );
    Ok(())
}

#[tokio::test]
async fn test_save_failure_aborts_remaining_rows() -> Result<()> {
    let root = root_with(
        "customers.json",
        r#"[
            {"fname": "Jane", "lname": "Doe", "emailaddress": "jane@example.com"},
            {"fname": "John", "lname": "Smith", "emailaddress": "john@example.com"},
            {"fname": "Ann", "lname": "Lee", "emailaddress": "ann@example.com"}
        ]"#,
    )?;
    let repository = MockRepository::rejecting("john@example.com");

    let err = command(&root, repository.clone())
        .execute("default", "var/import/customers.json")
        .await
        .unwrap_err();

    assert!(matches!(err, ImportError::CouldNotSaveCustomer { position: 2, .. }));
    assert_eq!(err.user_friendly_message(), "Could not save customer from record 2: Email john@example.com is already taken");
    assert_eq!(repository.saved().await, vec![draft("Jane", "Doe", "jane@example.com")]);
    Ok(())
}

#[tokio::test]
async fn test_continue_policy_reports_failed_rows() -> Result<()> {
    let root = root_with(
        "customers.txt",
        "fname,lname,emailaddress\nJane,Doe,jane@example.com\nJohn,Smith,john@example.com\nAnn,Lee,ann@example.com\n",
    )?;
    let repository = MockRepository::rejecting("john@example.com");
    let command = ImportCommand::new(
        LocalRoot::new(root.path().to_string_lossy()),
        repository.clone(),
        HeaderPolicy::FirstRow,
        FailurePolicy::Continue,
    );

    let summary = command.execute("default", "var/import/customers.txt").await?;

    assert_eq!(summary.created, 2);
    assert_eq!(summary.failed, 1);
    assert!(summary.has_failures());
    assert_eq!(summary.outcomes[1].position, 3);
    assert_eq!(repository.saved().await.len(), 2);
    Ok(())
}

#[tokio::test]
async fn test_xml_without_root_row_creates_nothing() -> Result<()> {
    let root = root_with(
        "customers.xml",
        "<?xml version=\"1.0\"?><root><customer><fname>Jane</fname></customer></root>",
    )?;
    let repository = MockRepository::default();

    let summary = command(&root, repository.clone())
        .execute("default", "var/import/customers.xml")
        .await?;

    assert!(repository.saved().await.is_empty());
    assert_eq!(summary.created + summary.skipped + summary.failed, 0);
    Ok(())
}

#[tokio::test]
async fn test_xml_rows_are_imported() -> Result<()> {
    let root = root_with(
        "customers.xml",
        "<root><row><fname>Jane</fname><lname>Doe</lname><emailaddress>jane@example.com</emailaddress></row></root>",
    )?;
    let repository = MockRepository::default();

    command(&root, repository.clone())
        .execute("default", "var/import/customers.xml")
        .await?;

    assert_eq!(repository.saved().await, vec![draft("Jane", "Doe", "jane@example.com")]);
    Ok(())
}

#[tokio::test]
async fn test_missing_source_is_file_not_found() -> Result<()> {
    let root = TempDir::new()?;
    let repository = MockRepository::default();

    let err = command(&root, repository.clone())
        .execute("default", "var/import/missing.csv")
        .await
        .unwrap_err();

    assert!(matches!(err, ImportError::FileNotFound { .. }));
    assert_eq!(err.exit_code(), 1);
    assert!(err.user_friendly_message().starts_with("File not found: "));
    assert!(repository.saved().await.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_unsupported_extension_is_reported() -> Result<()> {
    let root = root_with("customers.pdf", "%PDF-1.4")?;

    let err = command(&root, MockRepository::default())
        .execute("default", "var/import/customers.pdf")
        .await
        .unwrap_err();

    match err {
        ImportError::UnsupportedFileType { ref extension } => assert_eq!(extension, "pdf"),
        ref other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(err.exit_code(), 2);
    Ok(())
}

#[tokio::test]
async fn test_malformed_json_is_a_format_error() -> Result<()> {
    let root = root_with("customers.json", "[{\"fname\": ")?;

    let err = command(&root, MockRepository::default())
        .execute("default", "var/import/customers.json")
        .await
        .unwrap_err();

    assert!(err.to_string().starts_with("Error reading JSON file: "));
    assert_eq!(err.exit_code(), 3);
    Ok(())
}

#[tokio::test]
async fn test_end_to_end_with_rest_repository() -> Result<()> {
    let root = root_with(
        "customers.csv",
        "fname,lname,emailaddress\nJane,Doe,jane@example.com\nJohn,,john@example.com\n",
    )?;

    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/rest/V1/customers")
            .header("Authorization", "Bearer integration-token")
            .json_body(serde_json::json!({
                "customer": {"firstname": "Jane", "lastname": "Doe", "email": "jane@example.com"}
            }));
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({"id": 101, "email": "jane@example.com"}));
    });

    let repository =
        HttpCustomerRepository::new(server.url("/rest/V1/customers")).with_token("integration-token");
    let command = ImportCommand::new(
        LocalRoot::new(root.path().to_string_lossy()),
        repository,
        HeaderPolicy::FirstRow,
        FailurePolicy::Abort,
    );

    let summary = command.execute("b2b", "var/import/customers.csv").await?;

    api_mock.assert_hits(1);
    assert_eq!(summary.profile, "b2b");
    assert_eq!(summary.created, 1);
    assert_eq!(summary.skipped, 1);
    assert_eq!(summary.outcomes[0].status, RowStatus::Created { customer_id: Some(101) });
    Ok(())
}

#[tokio::test]
async fn test_end_to_end_repository_rejection() -> Result<()> {
    let root = root_with("customers.txt", "h\nJane,Doe,jane@example.com\n")?;

    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/rest/V1/customers");
        then.status(400).json_body(serde_json::json!({
            "message": "A customer with the same email address already exists in an associated website.",
            "parameters": []
        }));
    });

    let command = ImportCommand::new(
        LocalRoot::new(root.path().to_string_lossy()),
        HttpCustomerRepository::new(server.url("/rest/V1/customers")),
        HeaderPolicy::FirstRow,
        FailurePolicy::Abort,
    );

    let err = command.execute("default", "var/import/customers.txt").await.unwrap_err();

    match err {
        ImportError::CouldNotSaveCustomer { message, source, .. } => {
            assert_eq!(
                message,
                "A customer with the same email address already exists in an associated website."
            );
            assert!(matches!(source, SaveError::Input(_)));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    Ok(())
}
