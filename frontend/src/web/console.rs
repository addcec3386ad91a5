//! 日志输出到浏览器控制台
//!
//! `tracing-subscriber` 的 fmt 层把每条事件格式化成一行文本，
//! `ConsoleWriter` 在 drop 时把缓冲的文本交给 `console.log`。

use std::io;

use tracing_subscriber::fmt::MakeWriter;

/// 为每条日志事件创建一个 `ConsoleWriter`
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleMakeWriter;

impl<'a> MakeWriter<'a> for ConsoleMakeWriter {
    type Writer = ConsoleWriter;

    fn make_writer(&'a self) -> Self::Writer {
        ConsoleWriter { buf: Vec::new() }
    }
}

/// 缓冲一条日志，drop 时输出
pub struct ConsoleWriter {
    buf: Vec<u8>,
}

impl io::Write for ConsoleWriter {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        if self.buf.is_empty() {
            return Ok(());
        }
        let line = String::from_utf8_lossy(&self.buf);
        web_sys::console::log_1(&line.trim_end().into());
        self.buf.clear();
        Ok(())
    }
}

impl Drop for ConsoleWriter {
    fn drop(&mut self) {
        let _ = io::Write::flush(self);
    }
}

/// 安装全局日志订阅者，只应在浏览器入口调用一次
pub fn init_logging() {
    let result = tracing_subscriber::fmt()
        .with_writer(ConsoleMakeWriter)
        .with_ansi(false)
        .without_time()
        .with_target(false)
        .with_max_level(tracing::Level::DEBUG)
        .try_init();

    if result.is_err() {
        web_sys::console::warn_1(&"[Logging] subscriber already installed".into());
    }
}
