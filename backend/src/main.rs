use std::sync::Arc;

use aws_sdk_dynamodb::Client as DynamoDbClient;
use aws_sdk_s3::Client as S3Client;
use todo_backend::{
    object_storage::{S3Presigner, TracedPresigner},
    server,
    types::Environment,
    upload_link::TodoUploadLinks,
};
use todo_storage::todo::TodoStorage;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let environment = Environment::from_env();

    // JSON logs for staging/production (Datadog), plain text for development
    if environment.json_logs() {
        fmt()
            .json()
            .with_env_filter(EnvFilter::from_default_env())
            .init();
    } else {
        fmt().with_env_filter(EnvFilter::from_default_env()).init();
    }

    let s3_client = Arc::new(S3Client::from_conf(environment.s3_client_config().await));
    let presigner = Arc::new(TracedPresigner::new(S3Presigner::new(s3_client)));

    let dynamodb_client = Arc::new(DynamoDbClient::new(&environment.aws_config().await));
    let todo_store = Arc::new(TodoStorage::new(
        dynamodb_client,
        environment.todos_table_name(),
    ));

    let upload_links = Arc::new(TodoUploadLinks::new(
        presigner,
        todo_store,
        environment.upload_link_config(),
    ));

    server::start(environment, upload_links).await
}
