use std::io;
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;

use crate::smtp_probe::error::SessionError;

#[derive(Debug, Clone)]
pub(crate) struct SmtpReply {
    pub(crate) code: u16,
    pub(crate) lines: Vec<String>,
}

impl SmtpReply {
    pub(crate) fn is_positive_completion(&self) -> bool {
        (200..300).contains(&self.code)
    }

    pub(crate) fn is_transient_failure(&self) -> bool {
        (400..500).contains(&self.code)
    }

    pub(crate) fn is_permanent_failure(&self) -> bool {
        (500..600).contains(&self.code)
    }
}

/// One SMTP dialogue with a single host, recording a transcript as it
/// goes. Every network step shares the per-step deadline.
pub(crate) struct SmtpSession {
    host: String,
    stream: BufReader<TcpStream>,
    timeout: Option<Duration>,
    pub(crate) transcript: Vec<String>,
}

impl SmtpSession {
    pub(crate) async fn connect(
        host: &str,
        port: u16,
        timeout: Option<Duration>,
    ) -> Result<Self, SessionError> {
        let target = format!("{host}:{port}");
        let connect = TcpStream::connect(&target);
        let stream = match timeout {
            Some(limit) => match tokio::time::timeout(limit, connect).await {
                Ok(result) => result,
                Err(_) => return Err(SessionError::Timeout),
            },
            None => connect.await,
        }
        .map_err(|err| SessionError::Connect {
            host: target,
            source: err,
        })?;

        Ok(Self {
            host: host.to_string(),
            stream: BufReader::new(stream),
            timeout,
            transcript: Vec::new(),
        })
    }

    pub(crate) async fn read_banner(&mut self) -> Result<SmtpReply, SessionError> {
        let reply = self.read_reply().await?;
        self.record_reply(&reply);
        Ok(reply)
    }

    pub(crate) async fn send_command(&mut self, command: &str) -> Result<SmtpReply, SessionError> {
        self.record("C", command);
        self.write_line(command).await?;
        let reply = self.read_reply().await?;
        self.record_reply(&reply);
        Ok(reply)
    }

    /// Best-effort close; failures at this point change nothing.
    pub(crate) async fn quit(&mut self) {
        self.record("C", "QUIT");
        if self.write_line("QUIT").await.is_ok() {
            if let Ok(reply) = self.read_reply().await {
                self.record_reply(&reply);
            }
        }
    }

    async fn write_line(&mut self, command: &str) -> Result<(), SessionError> {
        let timeout = self.timeout;
        let mut data = command.as_bytes().to_vec();
        data.extend_from_slice(b"\r\n");
        let write = async {
            self.stream.write_all(&data).await?;
            self.stream.flush().await
        };
        run_timed(timeout, write).await
    }

    async fn read_reply(&mut self) -> Result<SmtpReply, SessionError> {
        let timeout = self.timeout;
        let mut lines = Vec::new();
        let mut code: Option<u16> = None;
        loop {
            let mut raw = String::new();
            let read = run_timed(timeout, self.stream.read_line(&mut raw)).await?;
            if read == 0 {
                return Err(SessionError::Io {
                    source: io::Error::new(io::ErrorKind::UnexpectedEof, "connection closed"),
                });
            }
            let line = raw.trim_end_matches(['\r', '\n']);

            let code_part = line
                .get(..3)
                .ok_or_else(|| SessionError::Protocol(format!("invalid reply: {line}")))?;
            let parsed_code = code_part
                .parse::<u16>()
                .map_err(|_| SessionError::Protocol(format!("invalid code in line: {line}")))?;
            if let Some(existing) = code {
                if existing != parsed_code {
                    return Err(SessionError::Protocol(format!(
                        "inconsistent reply codes: {existing} vs {parsed_code}"
                    )));
                }
            } else {
                code = Some(parsed_code);
            }

            let is_last = !line.as_bytes().get(3).map(|b| *b == b'-').unwrap_or(false);
            let text = line.get(4..).unwrap_or_default().to_string();
            lines.push(text);
            if is_last {
                break;
            }
        }
        Ok(SmtpReply {
            code: code.unwrap_or(0),
            lines,
        })
    }

    fn record(&mut self, direction: &str, message: &str) {
        self.transcript
            .push(format!("[{}] {direction}: {message}", self.host));
    }

    fn record_reply(&mut self, reply: &SmtpReply) {
        if reply.lines.is_empty() {
            self.record("S", &reply.code.to_string());
        } else {
            for line in &reply.lines {
                self.record("S", &format!("{} {}", reply.code, line));
            }
        }
    }
}

async fn run_timed<T>(
    timeout: Option<Duration>,
    step: impl Future<Output = io::Result<T>>,
) -> Result<T, SessionError> {
    match timeout {
        Some(limit) => match tokio::time::timeout(limit, step).await {
            Ok(result) => result.map_err(|err| SessionError::Io { source: err }),
            Err(_) => Err(SessionError::Timeout),
        },
        None => step.await.map_err(|err| SessionError::Io { source: err }),
    }
}
