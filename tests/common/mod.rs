#![allow(dead_code)]

use assert_cmd::Command;
use std::fs;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::path::Path;
use std::thread::{self, JoinHandle};

/// 決まった応答を順番に返すだけのHTTPサーバー
pub struct StubServer {
    pub base_url: String,
    handle: JoinHandle<Vec<String>>,
}

impl StubServer {
    /// 受け取ったリクエストヘッダを返す（全応答を返し終えるまで待つ）
    pub fn requests(self) -> Vec<String> {
        self.handle.join().unwrap()
    }
}

/// 応答ごとに1接続を受け付けるサーバーを起動
pub fn serve(responses: Vec<(u16, &'static str)>) -> StubServer {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());

    let handle = thread::spawn(move || {
        let mut requests = Vec::new();
        for (status, body) in responses {
            let (mut stream, _) = listener.accept().unwrap();
            requests.push(read_head(&mut stream));

            let response = format!(
                "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                reason(status),
                body.len(),
                body
            );
            stream.write_all(response.as_bytes()).unwrap();
            stream.flush().unwrap();
        }
        requests
    });

    StubServer { base_url, handle }
}

fn read_head(stream: &mut impl Read) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    loop {
        let n = stream.read(&mut chunk).unwrap();
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
        if buf.windows(4).any(|w| w == b"\r\n\r\n") {
            break;
        }
    }
    String::from_utf8_lossy(&buf).into_owned()
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        401 => "Unauthorized",
        404 => "Not Found",
        _ => "Error",
    }
}

/// HOME配下の設定ファイルにAPIのベースURLを書き込む
pub fn write_api_base_url(home: &Path, base_url: &str) {
    let dir = home.join(".diary-tools");
    fs::create_dir_all(&dir).unwrap();
    fs::write(
        dir.join("config.toml"),
        format!("api_base_url = \"{}\"\n", base_url),
    )
    .unwrap();
}

/// 認証情報を設定したclockifyコマンド
pub fn clockify_cmd(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("clockify").unwrap();
    cmd.current_dir(home)
        .env("HOME", home)
        .env("RUST_LOG", "warn")
        .env("API_KEY", "secret")
        .env("WORKSPACE_ID", "ws1");
    for var in [
        "HTTP_PROXY",
        "http_proxy",
        "HTTPS_PROXY",
        "https_proxy",
        "ALL_PROXY",
        "all_proxy",
    ] {
        cmd.env_remove(var);
    }
    cmd
}
