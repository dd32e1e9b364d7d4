//! Field-by-field form filling over the draft endpoints

use anyhow::{Context, Result};
use common::{CourseToggle, DraftCreated, FieldUpdate};
use reqwest::{multipart, Client, StatusCode};
use serde_json::Value;

async fn expect_json(response: reqwest::Response, expected: StatusCode) -> Result<Value> {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    if status != expected {
        anyhow::bail!("Expected {}, got {}: {}", expected, status, body);
    }
    serde_json::from_str(&body).with_context(|| format!("Invalid JSON response: {}", body))
}

async fn put_field(client: &Client, base: &str, field: &str, value: &str) -> Result<Value> {
    let response = client
        .put(format!("{}/fields/{}", base, field))
        .json(&FieldUpdate {
            value: value.to_string(),
        })
        .send()
        .await?;
    expect_json(response, StatusCode::OK).await
}

async fn put_image(client: &Client, base: &str, file_name: &str) -> Result<Value> {
    let part = multipart::Part::bytes(b"\x89PNG".to_vec()).file_name(file_name.to_string());
    let response = client
        .put(format!("{}/image", base))
        .multipart(multipart::Form::new().part("image", part))
        .send()
        .await?;
    expect_json(response, StatusCode::OK).await
}

/// Fill a draft one control at a time, then submit it
pub async fn fill_and_submit(server_url: &str, email: &str) -> Result<()> {
    let client = Client::new();

    let response = client
        .post(format!("{}/drafts", server_url))
        .send()
        .await?;
    let created: DraftCreated =
        serde_json::from_value(expect_json(response, StatusCode::CREATED).await?)?;
    let base = format!("{}/drafts/{}", server_url, created.draft_id);
    println!("Created draft {}", created.draft_id);

    // an empty submit reports every field
    let response = client.post(format!("{}/submit", base)).send().await?;
    let rejected = expect_json(response, StatusCode::UNPROCESSABLE_ENTITY).await?;
    let count = rejected["errors"].as_object().map(|e| e.len()).unwrap_or(0);
    if count != 7 {
        anyhow::bail!("Expected 7 messages for an empty draft, got {}", rejected);
    }

    put_field(&client, &base, "name", "Draft Employee").await?;
    put_field(&client, &base, "email", email).await?;
    put_field(&client, &base, "mobile", "9000000002").await?;
    put_field(&client, &base, "designation", "Sales").await?;
    put_field(&client, &base, "gender", "Female").await?;

    let response = client
        .put(format!("{}/courses/BSC", base))
        .json(&CourseToggle { checked: true })
        .send()
        .await?;
    let view = expect_json(response, StatusCode::OK).await?;
    if view["draft"]["course"] != serde_json::json!(["BSC"]) {
        anyhow::bail!("Course not recorded: {}", view);
    }

    let view = put_image(&client, &base, "portrait.gif").await?;
    if view["errors"]["image"] != "Only JPG and PNG files are allowed" {
        anyhow::bail!("GIF was not rejected: {}", view);
    }
    let view = put_image(&client, &base, "portrait.png").await?;
    if !view["errors"]["image"].is_null() {
        anyhow::bail!("PNG did not clear the image message: {}", view);
    }

    let response = client.post(format!("{}/submit", base)).send().await?;
    let receipt = expect_json(response, StatusCode::CREATED).await?;
    println!("Draft submitted: {}", receipt["registration_id"]);

    let response = client.delete(&base).send().await?;
    if response.status() != StatusCode::NO_CONTENT {
        anyhow::bail!("Discarding the draft returned {}", response.status());
    }

    Ok(())
}
