use std::{io, io::Write as _};

use anstream::stream::{AsLockedWrite, RawStream};
use anstyle::{AnsiColor, Color, Style};
use hocon_bind::{ConfigSchema, ParamRef, metadata::FieldShape};

use crate::{Printer, utils::RUST};

const INDENT: &str = "  ";
const DIMMED: Style = Style::new().dimmed();
const MAIN_NAME: Style = Style::new().bold();
const FIELD: Style = Style::new().underline();
const DEFAULT_VAL: Style = Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green)));
const UNSUPPORTED: Style = Style::new()
    .bold()
    .fg_color(Some(Color::Ansi(AnsiColor::Red)));

impl<W: RawStream + AsLockedWrite> Printer<W> {
    /// Prints help on config fields in the provided `schema`. Fields can be filtered by the supplied predicate.
    ///
    /// # Errors
    ///
    /// Propagates I/O errors.
    pub fn print_help(
        self,
        schema: &ConfigSchema,
        mut filter: impl FnMut(&ParamRef) -> bool,
    ) -> io::Result<()> {
        let mut writer = self.writer;
        for param in schema.params().iter().filter(|&param| filter(param)) {
            write_help(&mut writer, param)?;
            writeln!(&mut writer)?;
        }
        Ok(())
    }
}

fn write_help(writer: &mut impl io::Write, param: &ParamRef) -> io::Result<()> {
    let path = param.path();
    let (prefix, name) = match path.rsplit_once('.') {
        Some((prefix, name)) => (prefix, name),
        None => ("", path),
    };
    let prefix_sep = if prefix.is_empty() { "" } else { "." };
    writeln!(
        writer,
        "{DIMMED}{prefix}{prefix_sep}{DIMMED:#}{MAIN_NAME}{name}{MAIN_NAME:#}"
    )?;

    let field = param.field();
    let shape_style = if matches!(field.shape, FieldShape::Unsupported(_)) {
        UNSUPPORTED
    } else {
        Style::new()
    };
    writeln!(
        writer,
        "{INDENT}{FIELD}Type{FIELD:#}: {shape_style}{shape}{shape_style:#} \
         {RUST}[Rust: {config}.{field_name}: {ty}]{RUST:#}",
        shape = field.shape,
        config = param.config().ty.name_in_code(),
        field_name = field.rust_field_name,
        ty = field.rust_type.name_in_code()
    )?;

    if let Some(default) = param.directives().default {
        writeln!(
            writer,
            "{INDENT}{FIELD}Default{FIELD:#}: {DEFAULT_VAL}{default:?}{DEFAULT_VAL:#}"
        )?;
    }
    if !field.tag.is_empty() {
        writeln!(writer, "{INDENT}{FIELD}Tag{FIELD:#}: {}", field.tag)?;
    }

    for line in field.help.lines() {
        writeln!(writer, "{INDENT}{line}")?;
    }
    Ok(())
}
