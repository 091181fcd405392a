use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::TcpListener,
    task::JoinHandle,
};

pub const GENRE_PAGE: &str = r#"<!DOCTYPE html>
<html><body>
<div class="form-group checkbox-group row">
  <div class="checkbox col-6"><input id="1" value="1" name="genre[]" type="checkbox"><label for="1">Action</label></div>
  <div class="checkbox col-6"><input id="2" value="2" name="genre[]" type="checkbox"><label for="2">Comedy</label></div>
</div>
</body></html>"#;

/// Serves a single response and hands back the raw request head it received.
pub async fn serve_once(status: &'static str, body: Vec<u8>) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());
    let handle = tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.unwrap();
        let mut request = Vec::new();
        let mut buf = [0; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = stream.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            request.extend_from_slice(&buf[..n]);
        }
        let head = format!(
            "HTTP/1.1 {status}\r\nContent-Type: text/html\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
            body.len()
        );
        // The client may hang up early on error statuses.
        let _ = stream.write_all(head.as_bytes()).await;
        let _ = stream.write_all(&body).await;
        let _ = stream.shutdown().await;
        String::from_utf8(request).unwrap()
    });
    (base_url, handle)
}
