//! Output helpers shared by multiple commands.

use std::io;

use anstyle::{AnsiColor, Color, Style};
use hocon_bind::value::{Value, ValueOrigin, WithOrigin};

pub(crate) const RUST: Style = Style::new().dimmed();
const ARROW: Style = Style::new().bold();
const FILE: Style = Style::new()
    .bg_color(Some(Color::Ansi(AnsiColor::Cyan)))
    .fg_color(None);
const INLINE: Style = Style::new()
    .bg_color(Some(Color::Ansi(AnsiColor::Magenta)))
    .fg_color(None);

pub(crate) fn write_origin(writer: &mut impl io::Write, origin: &ValueOrigin) -> io::Result<()> {
    match origin {
        ValueOrigin::Inline => write!(writer, "{INLINE}inline{INLINE:#}"),
        ValueOrigin::File { name } => write!(writer, "{FILE}hocon:{FILE:#}{name}"),
        ValueOrigin::Path { source, path } => {
            write_origin(writer, source)?;
            if !path.is_empty() {
                write!(writer, " {ARROW}->{ARROW:#} .{path}")?;
            }
            Ok(())
        }
        _ => write!(writer, "{origin}"),
    }
}

pub(crate) fn write_value(
    writer: &mut impl io::Write,
    value: &WithOrigin,
    ident: usize,
) -> io::Result<()> {
    const NULL: Style = Style::new().bold();
    const BOOL: Style = Style::new().fg_color(Some(Color::Ansi(AnsiColor::Yellow)));
    const NUMBER: Style = Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green)));
    const STRING: Style = Style::new().fg_color(Some(Color::Ansi(AnsiColor::Cyan)));
    const OBJECT_KEY: Style = Style::new().bold();

    match &value.inner {
        Value::Null => write!(writer, "{NULL}null{NULL:#}"),
        Value::Bool(val) => write!(writer, "{BOOL}{val:?}{BOOL:#}"),
        Value::Number(val) => write!(writer, "{NUMBER}{val}{NUMBER:#}"),
        Value::String(val) => write!(writer, "{STRING}{val:?}{STRING:#}"),
        Value::Array(val) if val.is_empty() => write!(writer, "[]"),
        Value::Array(val) => {
            writeln!(writer, "[")?;
            for item in val {
                write!(writer, "{:ident$}  ", "")?;
                write_value(writer, item, ident + 2)?;
                writeln!(writer, ",")?;
            }
            write!(writer, "{:ident$}]", "")
        }
        Value::Object(val) => {
            let mut entries: Vec<_> = val.iter().collect();
            entries.sort_unstable_by_key(|(key, _)| *key);
            writeln!(writer, "{{")?;
            for (key, value) in entries {
                write!(writer, "{:ident$}  {OBJECT_KEY}{key:?}{OBJECT_KEY:#}: ", "")?;
                write_value(writer, value, ident + 2)?;
                writeln!(writer, ",")?;
            }
            write!(writer, "{:ident$}}}", "")
        }
    }
}
