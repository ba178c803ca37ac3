use std::io::{Read, Write};
use std::net::TcpListener;
use std::thread;

use contexto::{fetch_word_list, load_or_build, Config, ContextoError, DictionarySource, NgramEmbedder};

/// Serve exactly one HTTP response on a local port and return its URL.
fn serve_once(response: &'static str) -> (String, thread::JoinHandle<()>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let url = format!("http://{}/palavras.txt", listener.local_addr().unwrap());
    let handle = thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut request = Vec::new();
        let mut buf = [0u8; 512];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = stream.read(&mut buf).unwrap();
            if n == 0 {
                break;
            }
            request.extend_from_slice(&buf[..n]);
        }
        stream.write_all(response.as_bytes()).unwrap();
    });
    (url, handle)
}

/// URL of a local port nothing listens on.
fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}/palavras.txt")
}

fn url_config(dir: &std::path::Path, url: String) -> Config {
    Config {
        cache_path: dir.join("dados_contexto.bin"),
        dictionary: DictionarySource::Url(url),
        ..Config::default()
    }
}

#[test]
fn refused_connection_is_a_network_error() {
    let err = fetch_word_list(&closed_port_url()).unwrap_err();
    assert!(matches!(err, ContextoError::Network(_)));
}

#[test]
fn not_found_status_aborts_without_cache() {
    let (url, server) =
        serve_once("HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n");
    let dir = tempfile::tempdir().unwrap();
    let config = url_config(dir.path(), url);

    let err = load_or_build(&config, &NgramEmbedder::default(), false).unwrap_err();
    server.join().unwrap();
    assert!(matches!(err, ContextoError::HttpStatus(404)));
    assert!(!config.cache_path.exists());
}

#[test]
fn refused_connection_aborts_without_cache() {
    let dir = tempfile::tempdir().unwrap();
    let config = url_config(dir.path(), closed_port_url());
    let err = load_or_build(&config, &NgramEmbedder::default(), false).unwrap_err();
    assert!(matches!(err, ContextoError::Network(_)));
    assert!(!config.cache_path.exists());
}

#[test]
fn downloaded_list_is_cleaned_and_cached() {
    let (url, server) = serve_once(
        "HTTP/1.1 200 OK\r\nContent-Length: 19\r\nConnection: close\r\n\r\nMar\nsol\nab\nlua\nsol\n",
    );
    let dir = tempfile::tempdir().unwrap();
    let config = url_config(dir.path(), url);

    let store = load_or_build(&config, &NgramEmbedder::default(), false).unwrap();
    server.join().unwrap();
    assert_eq!(store.words(), ["lua", "mar", "sol"]);
    assert!(config.cache_path.exists());
}
