mod support;

use std::time::Duration;

use stremio_addon::{Addon, ServeError, model::Manifest};
use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::{TcpListener, TcpStream},
    time::timeout,
};

use support::top_movies;

#[tokio::test]
async fn serves_manifest_over_tcp() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let mut addon = Addon::new(Manifest::default());
    addon.register_movie_catalog("Top Movies", top_movies).unwrap();
    let server = tokio::spawn(addon.serve_with_listener(listener));

    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream
        .write_all(
            b"GET /catalog/movie/top-movies.json HTTP/1.1\r\nHost: localhost\r\n\r\n",
        )
        .await
        .unwrap();

    // The connection is kept alive, so read until the body is complete.
    let raw = timeout(Duration::from_secs(5), async {
        let mut buffer = Vec::new();
        let mut chunk = [0u8; 1024];
        loop {
            let read = stream.read(&mut chunk).await.unwrap();
            if read == 0 {
                break;
            }
            buffer.extend_from_slice(&chunk[..read]);
            if buffer.ends_with(b"}]}") {
                break;
            }
        }
        String::from_utf8(buffer).unwrap()
    })
    .await
    .expect("response within timeout");

    assert!(raw.starts_with("HTTP/1.1 200 OK"), "{raw}");
    let lowercase = raw.to_ascii_lowercase();
    assert!(lowercase.contains("access-control-allow-origin: *"), "{raw}");
    assert!(lowercase.contains("cache-control: public, max-age=3600"), "{raw}");
    assert!(raw.contains(r#""name":"Inception""#), "{raw}");

    server.abort();
}

#[tokio::test]
async fn bind_failure_is_reported() {
    let occupied = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = occupied.local_addr().unwrap().port();

    let err = Addon::new(Manifest::default())
        .serve_on("127.0.0.1", port)
        .await
        .unwrap_err();

    assert!(
        matches!(err, ServeError::Bind { ref addr, .. } if addr == &format!("127.0.0.1:{port}")),
        "{err:?}"
    );
}
