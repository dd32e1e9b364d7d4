mod drafts;
mod test_utils;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use test_utils::*;

/// Run against a server started with `--sink memory`, so repeated emails are refused
#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("e2e_tests=debug,info")
        .init();

    let server_url =
        std::env::var("SERVER_URL").unwrap_or_else(|_| "http://localhost:8080".to_string());

    let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let workspace_root = manifest_dir
        .parent()
        .and_then(Path::parent)
        .context("e2e crate is not inside the workspace")?
        .to_path_buf();
    let client_binary = workspace_root.join("target").join("release").join("client");
    let test_data_dir = manifest_dir.join("test_data");
    std::fs::create_dir_all(&test_data_dir)?;

    println!("Server URL: {}", server_url);
    println!("Client binary: {:?}", client_binary);

    wait_for_server(&server_url).await?;

    // unique per run, since the memory sink remembers every email it accepted
    let run_id = common::get_current_timestamp_ms();
    let email = format!("e2e-{}@corp.example", run_id);
    let draft_email = format!("e2e-draft-{}@corp.example", run_id);

    let result = async {
        let images = create_test_images(&test_data_dir, &["portrait.png", "portrait.gif"])?;

        println!("\n📝 Registering with the client...");
        let output = register(&client_binary, &server_url, &email, &images[0])?;
        expect_success(&output, "Registration")?;
        println!("✅ Registration accepted");

        println!("\n🖼️  Registering with a GIF...");
        let output = register(&client_binary, &server_url, "gif@corp.example", &images[1])?;
        expect_rejection(&output, "GIF registration", "Only JPG and PNG files are allowed")?;
        println!("✅ GIF rejected");

        println!("\n📧 Registering the same email again...");
        let output = register(&client_binary, &server_url, &email, &images[0])?;
        expect_rejection(&output, "Duplicate registration", "email: This email is already registered")?;
        println!("✅ Duplicate email rejected");

        println!("\n🗂️  Filling a draft field by field...");
        drafts::fill_and_submit(&server_url, &draft_email).await?;
        println!("✅ Draft flow passed");

        Ok::<(), anyhow::Error>(())
    }
    .await;

    if let Err(e) = cleanup_test_data(&test_data_dir) {
        eprintln!("Warning: Failed to cleanup test data: {}", e);
    }

    result?;
    println!("\n✅ All E2E tests passed!");
    Ok(())
}

fn cleanup_test_data(test_data_dir: &Path) -> Result<()> {
    let keep_data = std::env::var("KEEP_TEST_DATA").unwrap_or_else(|_| "false".to_string());
    if keep_data == "true" {
        println!(
            "\n⚠️  Keeping test data (KEEP_TEST_DATA=true): {:?}",
            test_data_dir
        );
        return Ok(());
    }

    println!("\n🧹 Cleaning up test data: {:?}", test_data_dir);
    if test_data_dir.exists() {
        std::fs::remove_dir_all(test_data_dir)
            .with_context(|| format!("Failed to remove test data: {:?}", test_data_dir))?;
    }
    Ok(())
}
