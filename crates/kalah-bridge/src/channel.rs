//! Line-oriented message transport
//!
//! The agent's message loop is written once against [`MessageChannel`] and runs
//! either over a real text stream ([`LineChannel`], e.g. stdin/stdout) or over the
//! in-process [`Bridge`](crate::Bridge).

use std::io::{self, BufRead, Write};

use crate::error::{BridgeError, BridgeResult};

/// Blocking, one-message-at-a-time duplex transport
pub trait MessageChannel {
    /// Send one message (without a trailing newline)
    fn send_msg(&mut self, msg: &str) -> BridgeResult<()>;

    /// Block until the next message arrives
    fn recv_msg(&mut self) -> BridgeResult<String>;
}

impl<C: MessageChannel + ?Sized> MessageChannel for &mut C {
    fn send_msg(&mut self, msg: &str) -> BridgeResult<()> {
        (**self).send_msg(msg)
    }

    fn recv_msg(&mut self) -> BridgeResult<String> {
        (**self).recv_msg()
    }
}

/// One message per line over a reader/writer pair
///
/// Every send is flushed so the peer sees it immediately. EOF on the reader is
/// reported as [`BridgeError::Closed`].
pub struct LineChannel<R, W> {
    reader: R,
    writer: W,
    buf: String,
}

impl<R: BufRead, W: Write> LineChannel<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            reader,
            writer,
            buf: String::new(),
        }
    }

    pub fn into_inner(self) -> (R, W) {
        (self.reader, self.writer)
    }
}

impl LineChannel<io::StdinLock<'static>, io::Stdout> {
    /// Process stdin/stdout
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> MessageChannel for LineChannel<R, W> {
    fn send_msg(&mut self, msg: &str) -> BridgeResult<()> {
        log::trace!("send: {msg}");
        self.writer.write_all(msg.as_bytes())?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(())
    }

    fn recv_msg(&mut self) -> BridgeResult<String> {
        self.buf.clear();
        let read = match self.reader.read_line(&mut self.buf) {
            Ok(n) => n,
            Err(e)
                if matches!(
                    e.kind(),
                    io::ErrorKind::UnexpectedEof | io::ErrorKind::BrokenPipe
                ) =>
            {
                log::debug!("input closed: {e}");
                return Err(BridgeError::Closed);
            }
            Err(e) => return Err(e.into()),
        };
        if read == 0 {
            log::debug!("input closed (EOF)");
            return Err(BridgeError::Closed);
        }
        let line = self.buf.trim_end_matches(['\n', '\r']);
        log::trace!("recv: {line}");
        Ok(line.to_string())
    }
}
