//! Line-delimited dispatcher over a byte stream.
//!
//! Each non-blank input line is one encoded method call. Each call produces
//! exactly one output line holding the encoded reply; a not-implemented reply
//! is therefore an empty line.

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info};

use crate::channel::{ChannelName, ChannelRegistry};
use crate::codec::MethodCodec;
use crate::error::{Error, Result};
use crate::method::MethodResponse;

/// Counters for one serve session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ServeStats {
    /// Calls answered with a value.
    pub succeeded: u64,
    /// Calls answered with the not-implemented sentinel.
    pub not_implemented: u64,
    /// Calls answered with an error envelope.
    pub failed: u64,
}

impl ServeStats {
    /// Total number of calls answered.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.succeeded + self.not_implemented + self.failed
    }

    fn record(&mut self, response: &MethodResponse) {
        match response {
            MethodResponse::Success(_) => self.succeeded += 1,
            MethodResponse::NotImplemented => self.not_implemented += 1,
            MethodResponse::Error { .. } => self.failed += 1,
        }
    }
}

fn trim_ascii(bytes: &[u8]) -> &[u8] {
    let start = bytes
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(bytes.len());
    let end = bytes
        .iter()
        .rposition(|b| !b.is_ascii_whitespace())
        .map_or(start, |i| i + 1);
    &bytes[start..end]
}

/// Answer calls read from `reader` on `channel` until end of input.
///
/// # Errors
///
/// Returns [`Error::NoHandler`] if nothing is registered on `channel`, or an
/// I/O error if reading or writing fails.
pub async fn serve_lines<C, R, W>(
    registry: &ChannelRegistry<C>,
    channel: &ChannelName,
    mut reader: R,
    mut writer: W,
) -> Result<ServeStats>
where
    C: MethodCodec,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    if !registry.contains(channel.as_str()) {
        return Err(Error::NoHandler {
            channel: channel.to_string(),
        });
    }

    info!(channel = %channel, "serving method calls");
    let mut stats = ServeStats::default();
    let mut buf = Vec::new();

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf).await? == 0 {
            break;
        }

        // Raw bytes: a line that is not UTF-8 is still a call, answered with
        // a decode error by the codec.
        let line = trim_ascii(&buf);
        if line.is_empty() {
            continue;
        }

        let reply = registry
            .dispatch(channel.as_str(), line)?
            .ok_or_else(|| Error::NoHandler {
                channel: channel.to_string(),
            })?;
        stats.record(&registry.codec().decode_response(&reply)?);

        writer.write_all(&reply).await?;
        writer.write_all(b"\n").await?;
        writer.flush().await?;
    }

    debug!(?stats, "input closed");
    Ok(stats)
}
