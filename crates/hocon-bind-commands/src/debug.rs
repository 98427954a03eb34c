use std::io::{self, Write as _};

use anstream::stream::{AsLockedWrite, RawStream};
use anstyle::{AnsiColor, Color, Style};
use hocon_bind::{ConfigSchema, ConfigTree, LoadError, ParamRef};

use crate::{
    Printer,
    utils::{RUST, write_origin, write_value},
};

const SECTION: Style = Style::new().bold();
const DEFAULT_LABEL: Style = Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green)));
const ERROR_LABEL: Style = Style::new()
    .bold()
    .bg_color(Some(Color::Ansi(AnsiColor::Red)))
    .fg_color(None);

impl<W: RawStream + AsLockedWrite> Printer<W> {
    /// Prints debug info for the values of config fields in the provided `schema` as found in `tree`.
    /// If values fail to load, corresponding errors are output as well. Fields can be filtered by
    /// the supplied predicate.
    ///
    /// Returns errors for all fields that would fail to load, in the order of their declaration.
    ///
    /// # Errors
    ///
    /// Propagates I/O errors.
    pub fn print_debug(
        self,
        schema: &ConfigSchema,
        tree: &ConfigTree,
        mut filter: impl FnMut(&ParamRef) -> bool,
    ) -> io::Result<Vec<LoadError>> {
        let mut writer = self.writer;
        write!(&mut writer, "{SECTION}Configuration source:{SECTION:#} ")?;
        write_origin(&mut writer, &tree.root().origin)?;
        writeln!(&mut writer)?;
        writeln!(&mut writer)?;
        writeln!(&mut writer, "{SECTION}Values:{SECTION:#}")?;

        let mut errors = vec![];
        for param in schema.params().iter().filter(|&param| filter(param)) {
            write_param(&mut writer, param, tree)?;
            if let Err(err) = param.validate(tree) {
                write_error(&mut writer, &err)?;
                errors.push(err);
            }
        }
        Ok(errors)
    }
}

fn write_param(writer: &mut impl io::Write, param: &ParamRef, tree: &ConfigTree) -> io::Result<()> {
    write!(
        writer,
        "{path} {RUST}[Rust: {}.{}]{RUST:#}",
        param.config().ty.name_in_code(),
        param.field().rust_field_name,
        path = param.path()
    )?;

    if let Some(value) = tree.get_value(param.path()) {
        write!(writer, " = ")?;
        write_value(writer, value, 0)?;
        writeln!(writer)?;
        write!(writer, "  Origin: ")?;
        write_origin(writer, &value.origin)?;
        writeln!(writer)
    } else if let Some(default) = param.directives().default {
        writeln!(writer, " = {default:?} {DEFAULT_LABEL}(default){DEFAULT_LABEL:#}")
    } else {
        writeln!(writer)
    }
}

fn write_error(writer: &mut impl io::Write, err: &LoadError) -> io::Result<()> {
    writeln!(writer, "  {ERROR_LABEL}Error:{ERROR_LABEL:#} {err}")
}
