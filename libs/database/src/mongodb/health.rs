use mongodb::{Client, bson::doc};

/// Ping the deployment; `Err` carries the driver's message.
pub async fn check_health(client: &Client) -> Result<(), String> {
    client
        .database("admin")
        .run_command(doc! { "ping": 1 })
        .await
        .map(|_| ())
        .map_err(|e| e.to_string())
}
