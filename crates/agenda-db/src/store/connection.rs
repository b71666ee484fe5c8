use bson::doc;
use mongodb::{Client, Database};

/// ## Summary
/// Connects to the document store and returns a handle to the service
/// database.
///
/// ## Errors
/// Returns an error if the client cannot be built from the URL or the
/// deployment does not answer a ping.
#[tracing::instrument(skip(url))]
pub async fn connect(url: &str, db_name: &str) -> anyhow::Result<Database> {
    tracing::debug!("Connecting to document store");

    let client = Client::with_uri_str(url).await?;
    let db = client.database(db_name);

    // Fail at startup on an unreachable deployment, not on the first request.
    db.run_command(doc! { "ping": 1 }).await?;

    tracing::info!(database = db_name, "Document store connection established");

    Ok(db)
}
