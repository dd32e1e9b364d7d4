use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::time::Duration;
use tokio::time::sleep;

/// Not a real image; the server only looks at the name
const IMAGE_BYTES: &[u8] = b"\x89PNG\r\n\x1a\n";

pub fn create_test_images(dir: &Path, names: &[&str]) -> Result<Vec<PathBuf>> {
    names
        .iter()
        .map(|name| {
            let path = dir.join(name);
            fs::write(&path, IMAGE_BYTES)
                .with_context(|| format!("Failed to create test image: {:?}", path))?;
            Ok(path)
        })
        .collect()
}

pub async fn wait_for_server(url: &str) -> Result<()> {
    let client = reqwest::Client::new();
    let health_url = format!("{}/health", url);

    println!("Waiting for server to be ready...");
    for i in 0..30 {
        if let Ok(response) = client.get(&health_url).send().await {
            if response.status().is_success() {
                println!("Server is ready!");
                return Ok(());
            }
        }
        // refused connections and non-2xx answers both mean "not yet"
        if i < 29 {
            sleep(Duration::from_secs(1)).await;
        }
    }

    anyhow::bail!("Server did not become ready within 30 seconds");
}

/// Run `client register` with a complete set of answers for `email`
pub fn register(
    client_binary: &Path,
    server_url: &str,
    email: &str,
    image: &Path,
) -> Result<Output> {
    Command::new(client_binary)
        .arg("--server")
        .arg(server_url)
        .arg("register")
        .args(["--name", "E2E Employee"])
        .args(["--email", email])
        .args(["--mobile", "9000000001"])
        .args(["--designation", "Manager"])
        .args(["--gender", "Male"])
        .args(["--course", "MCA", "--course", "BCA"])
        .arg("--image")
        .arg(image)
        .output()
        .with_context(|| format!("Failed to run client binary: {:?}", client_binary))
}

pub fn expect_success(output: &Output, what: &str) -> Result<()> {
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let stdout = String::from_utf8_lossy(&output.stdout);
        anyhow::bail!("{} failed:\nSTDOUT: {}\nSTDERR: {}", what, stdout, stderr);
    }
    Ok(())
}

/// The client must exit non-zero and name `expected` on stderr
pub fn expect_rejection(output: &Output, what: &str, expected: &str) -> Result<()> {
    let stderr = String::from_utf8_lossy(&output.stderr);
    if output.status.success() {
        anyhow::bail!("{} unexpectedly succeeded", what);
    }
    if !stderr.contains(expected) {
        anyhow::bail!("{}: expected {:?} on stderr, got:\n{}", what, expected, stderr);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Answers /health with 503 `unavailable` times, then 200
    async fn flaky_health(unavailable: usize) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}", listener.local_addr().unwrap());
        tokio::spawn(async move {
            let mut served = 0;
            loop {
                let (mut socket, _) = listener.accept().await.unwrap();
                let mut request = [0u8; 1024];
                let _ = socket.read(&mut request).await;
                let status = if served < unavailable {
                    "503 Service Unavailable"
                } else {
                    "200 OK"
                };
                served += 1;
                let response =
                    format!("HTTP/1.1 {status}\r\nContent-Length: 0\r\nConnection: close\r\n\r\n");
                let _ = socket.write_all(response.as_bytes()).await;
            }
        });
        url
    }

    #[tokio::test]
    async fn test_wait_for_server_backs_off_on_error_status() {
        let url = flaky_health(2).await;
        let started = Instant::now();
        wait_for_server(&url).await.unwrap();
        assert!(started.elapsed() >= Duration::from_secs(2));
    }

    #[tokio::test]
    async fn test_wait_for_server_ready_at_once() {
        let url = flaky_health(0).await;
        let started = Instant::now();
        wait_for_server(&url).await.unwrap();
        assert!(started.elapsed() < Duration::from_secs(1));
    }
}
