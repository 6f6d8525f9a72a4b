//! In-process RESP server that answers the handful of list commands the
//! snapshot cache issues, so remote mode can be tested without Redis.

use std::collections::{HashMap, VecDeque};
use std::io;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

#[derive(Default)]
struct Shared {
    lists: Mutex<HashMap<String, VecDeque<String>>>,
    /// When set, EXEC and LRANGE answer with an error
    failing: AtomicBool,
    accepted: AtomicUsize,
    open: AtomicUsize,
}

pub struct FakeRedis {
    addr: SocketAddr,
    shared: Arc<Shared>,
    accept_task: JoinHandle<()>,
}

impl FakeRedis {
    pub async fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let shared = Arc::new(Shared::default());

        let accept_shared = shared.clone();
        let accept_task = tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                accept_shared.accepted.fetch_add(1, Ordering::SeqCst);
                accept_shared.open.fetch_add(1, Ordering::SeqCst);
                let shared = accept_shared.clone();
                tokio::spawn(async move {
                    let _ = serve(stream, &shared).await;
                    shared.open.fetch_sub(1, Ordering::SeqCst);
                });
            }
        });

        Self {
            addr,
            shared,
            accept_task,
        }
    }

    pub fn url(&self) -> String {
        format!("redis://{}", self.addr)
    }

    pub fn set_failing(&self, failing: bool) {
        self.shared.failing.store(failing, Ordering::SeqCst);
    }

    /// LPUSH straight into the store, bypassing the cache.
    pub fn push_raw(&self, key: &str, value: &str) {
        self.shared
            .lists
            .lock()
            .entry(key.to_string())
            .or_default()
            .push_front(value.to_string());
    }

    pub fn list(&self, key: &str) -> Vec<String> {
        self.shared
            .lists
            .lock()
            .get(key)
            .map(|list| list.iter().cloned().collect())
            .unwrap_or_default()
    }

    pub fn accepted_connections(&self) -> usize {
        self.shared.accepted.load(Ordering::SeqCst)
    }

    /// Waits up to two seconds for the number of open client connections to reach `expected`.
    pub async fn wait_for_open_connections(&self, expected: usize) -> usize {
        for _ in 0..40 {
            if self.shared.open.load(Ordering::SeqCst) == expected {
                break;
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        self.shared.open.load(Ordering::SeqCst)
    }
}

impl Drop for FakeRedis {
    fn drop(&mut self) {
        self.accept_task.abort();
    }
}

enum Reply {
    Status(&'static str),
    Error(String),
    Integer(i64),
    Bulk(String),
    Array(Vec<Reply>),
}

impl Reply {
    fn encode(&self, out: &mut Vec<u8>) {
        match self {
            Reply::Status(s) => out.extend_from_slice(format!("+{}\r\n", s).as_bytes()),
            Reply::Error(e) => out.extend_from_slice(format!("-{}\r\n", e).as_bytes()),
            Reply::Integer(n) => out.extend_from_slice(format!(":{}\r\n", n).as_bytes()),
            Reply::Bulk(s) => {
                out.extend_from_slice(format!("${}\r\n{}\r\n", s.len(), s).as_bytes())
            }
            Reply::Array(items) => {
                out.extend_from_slice(format!("*{}\r\n", items.len()).as_bytes());
                for item in items {
                    item.encode(out);
                }
            }
        }
    }
}

async fn serve(stream: TcpStream, shared: &Shared) -> io::Result<()> {
    let (read, mut write) = stream.into_split();
    let mut reader = BufReader::new(read);
    let mut queued: Option<Vec<Vec<String>>> = None;

    while let Some(args) = read_command(&mut reader).await? {
        let name = args[0].to_ascii_uppercase();

        let reply = if name == "MULTI" {
            queued = Some(Vec::new());
            Reply::Status("OK")
        } else if name == "EXEC" {
            let commands = queued.take().unwrap_or_default();
            if shared.failing.load(Ordering::SeqCst) {
                Reply::Error("EXECABORT Transaction discarded".to_string())
            } else {
                Reply::Array(commands.iter().map(|c| execute(c, shared)).collect())
            }
        } else if let Some(commands) = queued.as_mut() {
            commands.push(args);
            Reply::Status("QUEUED")
        } else {
            execute(&args, shared)
        };

        let mut out = Vec::new();
        reply.encode(&mut out);
        write.write_all(&out).await?;
    }

    Ok(())
}

fn execute(args: &[String], shared: &Shared) -> Reply {
    let mut lists = shared.lists.lock();
    let index = |i: usize| args.get(i).and_then(|v| v.parse::<i64>().ok()).unwrap_or(0);

    match args[0].to_ascii_uppercase().as_str() {
        "PING" => Reply::Status("PONG"),
        "LPUSH" => {
            let list = lists.entry(args[1].clone()).or_default();
            for value in &args[2..] {
                list.push_front(value.clone());
            }
            Reply::Integer(list.len() as i64)
        }
        "LTRIM" => {
            let kept = lists.get(&args[1]).map(|list| slice(list, index(2), index(3)));
            match kept {
                Some(kept) if kept.is_empty() => {
                    lists.remove(&args[1]);
                }
                Some(kept) => {
                    lists.insert(args[1].clone(), kept.into_iter().collect());
                }
                None => {}
            }
            Reply::Status("OK")
        }
        "PEXPIRE" => Reply::Integer(i64::from(lists.contains_key(&args[1]))),
        "LRANGE" => {
            if shared.failing.load(Ordering::SeqCst) {
                return Reply::Error("ERR simulated outage".to_string());
            }
            let values = lists
                .get(&args[1])
                .map(|list| slice(list, index(2), index(3)))
                .unwrap_or_default();
            Reply::Array(values.into_iter().map(Reply::Bulk).collect())
        }
        // CLIENT SETINFO and anything else sent during the handshake
        _ => Reply::Status("OK"),
    }
}

/// Inclusive range with Redis' negative-index rules.
fn slice(list: &VecDeque<String>, start: i64, stop: i64) -> Vec<String> {
    let len = list.len() as i64;
    let start = if start < 0 { (len + start).max(0) } else { start };
    let stop = if stop < 0 { len + stop } else { stop.min(len - 1) };
    if start > stop || start >= len {
        return Vec::new();
    }
    list.iter()
        .skip(start as usize)
        .take((stop - start + 1) as usize)
        .cloned()
        .collect()
}

async fn read_command<R>(reader: &mut R) -> io::Result<Option<Vec<String>>>
where
    R: AsyncBufRead + Unpin,
{
    let mut line = String::new();
    if reader.read_line(&mut line).await? == 0 {
        return Ok(None);
    }
    let count: usize = header(&line, '*')?;

    let mut args = Vec::with_capacity(count);
    for _ in 0..count {
        line.clear();
        reader.read_line(&mut line).await?;
        let len: usize = header(&line, '$')?;

        let mut buf = vec![0; len + 2];
        reader.read_exact(&mut buf).await?;
        buf.truncate(len);
        args.push(String::from_utf8_lossy(&buf).into_owned());
    }

    if args.is_empty() {
        return Err(io::Error::new(io::ErrorKind::InvalidData, "empty command"));
    }
    Ok(Some(args))
}

fn header(line: &str, marker: char) -> io::Result<usize> {
    line.trim_end()
        .strip_prefix(marker)
        .and_then(|n| n.parse().ok())
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidData, line.to_string()))
}
