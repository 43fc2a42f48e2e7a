//! Plain tab-delimited format
//!
//! Default for file and a selectable option for every transport. The line
//! prefix is the template `time\t[name]\t{id}` unless the locator query
//! string overrides it (`&` separators become tabs); the word-boundary
//! tokens `time`, `name` and `id` are substituted once each.

use super::{now_line, replace_token, Formatter};
use crate::core::value::sanitize_line;
use crate::core::{LogValue, Severity, SharedConfig};
use crate::locator::Locator;

pub struct TabFormat {
    prefix: String,
    config: SharedConfig,
}

const DEFAULT_PREFIX: &str = "time\t[name]\t{id}";

impl TabFormat {
    pub fn new(locator: &Locator, config: SharedConfig) -> Self {
        let prefix = match &locator.query {
            Some(query) => sanitize_line(query).replace('&', "\t"),
            None => DEFAULT_PREFIX.to_string(),
        };
        Self { prefix, config }
    }
}

impl Formatter for TabFormat {
    fn format(&self, id: &str, severity: Severity, args: &[LogValue]) -> String {
        let mut msg = replace_token(&self.prefix, "time", &now_line());
        msg = replace_token(&msg, "name", severity.name());
        msg = replace_token(&msg, "id", id);

        let verbose = self.config.verbose();
        let dump_base = self.config.dump_base();
        for arg in args {
            msg.push('\t');
            msg.push_str(&arg.plain(verbose, dump_base));
        }

        msg
    }
}
