//! Debug printer.

use core::fmt::{self, Write as _};

use crate::{Context, NodeHandle, NodeIface, NodeKind};

/// State for an indent level.
#[derive(Clone, Copy)]
struct IndentLevel {
    /// Whether this is the last item.
    is_last_item: bool,
    /// Whether the line is the first line.
    is_first_line: bool,
}

impl IndentLevel {
    /// Returns the indent string for the indent type.
    fn as_str(self) -> &'static str {
        match (self.is_last_item, self.is_first_line) {
            (false, true) => "|-- ",
            (false, false) => "|   ",
            (true, true) => "`-- ",
            (true, false) => "    ",
        }
    }

    /// Returns the leading part of the indent string.
    fn as_str_leading(self) -> &'static str {
        match (self.is_last_item, self.is_first_line) {
            (false, true) => "|--",
            (false, false) => "|",
            (true, true) => "`--",
            (true, false) => "",
        }
    }

    /// Returns the trailing whitespaces part of the indent string.
    fn as_str_trailing_spaces(self) -> &'static str {
        match (self.is_last_item, self.is_first_line) {
            (_, true) => " ",
            (false, false) => "   ",
            (true, false) => "    ",
        }
    }

    /// Returns whether the indent string consists of only whitespaces.
    #[inline]
    #[must_use]
    fn is_all_whitespace(&self) -> bool {
        self.is_last_item && !self.is_first_line
    }
}

/// State of the line writing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineState {
    /// Before any character of the indent is written to the current line.
    BeforeIndent,
    /// Indents are written except for the trailing whitespaces.
    PartialIndent,
    /// Writing content.
    Content,
}

/// Writer which prefixes every line with the tree indent.
struct IndentWriter<'a, 'b> {
    /// Backend formatter.
    fmt: &'b mut fmt::Formatter<'a>,
    /// State of the line writing.
    line_state: LineState,
    /// Indents.
    indents: Vec<IndentLevel>,
}

impl<'a, 'b> IndentWriter<'a, 'b> {
    /// Creates a new writer.
    fn new(fmt: &'b mut fmt::Formatter<'a>) -> Self {
        Self {
            fmt,
            line_state: LineState::BeforeIndent,
            indents: Vec::new(),
        }
    }

    /// Opens the next child item.
    ///
    /// Writes a newline if necessary. Must not be called for the root item.
    fn open_item(&mut self, is_last_item: bool) -> fmt::Result {
        if self.line_state != LineState::BeforeIndent {
            self.fmt.write_char('\n')?;
            self.line_state = LineState::BeforeIndent;
        }
        if let Some(indent) = self.indents.last_mut() {
            indent.is_first_line = false;
        }
        self.indents.push(IndentLevel {
            is_last_item,
            is_first_line: true,
        });

        Ok(())
    }

    /// Closes the current child item.
    fn close_item(&mut self) {
        let closed = self.indents.pop();
        debug_assert!(
            closed.is_some(),
            "[consistency] items must be opened before closed"
        );
    }

    /// Writes the indent except for the trailing whitespaces.
    fn write_indent_partial(&mut self) -> fmt::Result {
        let mut indents = &self.indents[..];
        while indents.last().map_or(false, |i| i.is_all_whitespace()) {
            indents = &indents[..(indents.len() - 1)];
        }
        if let Some((last, init)) = indents.split_last() {
            for indent in init {
                self.fmt.write_str(indent.as_str())?;
            }
            self.fmt.write_str(last.as_str_leading())?;
        }

        Ok(())
    }

    /// Writes the rest of the indents which are partially written.
    fn complete_partial_indent(&mut self) -> fmt::Result {
        debug_assert_eq!(self.line_state, LineState::PartialIndent);
        if let Some(indent) = self.indents.last() {
            self.fmt.write_str(indent.as_str_trailing_spaces())?;
        }

        Ok(())
    }
}

impl fmt::Write for IndentWriter<'_, '_> {
    fn write_str(&mut self, mut s: &str) -> fmt::Result {
        while !s.is_empty() {
            if self.line_state == LineState::BeforeIndent {
                self.write_indent_partial()?;
                self.line_state = LineState::PartialIndent;
            }

            let (line_end, ends_with_newline) = match s.find('\n') {
                Some(pos) => {
                    if let Some(level) = self.indents.last_mut() {
                        level.is_first_line = false;
                    }
                    (pos + 1, true)
                }
                None => (s.len(), false),
            };
            let content = &s[..line_end];
            if !content.is_empty() {
                debug_assert_ne!(
                    self.line_state,
                    LineState::BeforeIndent,
                    "[consistency] indent must be written before the content"
                );
                if self.line_state == LineState::PartialIndent {
                    self.complete_partial_indent()?;
                }
                self.fmt.write_str(content)?;
                self.line_state = if ends_with_newline {
                    LineState::BeforeIndent
                } else {
                    LineState::Content
                };
            }
            s = &s[line_end..];
        }

        Ok(())
    }
}

/// Tree printer for debugging.
///
/// Prints one node per line: containers with their kind and size, scalars
/// with their kind and value, object members prefixed by the quoted key.
///
/// ```text
/// object (2)
/// |-- "name": string "x"
/// `-- "args": array (2)
///     |-- int 1
///     `-- null
/// ```
///
/// The output format is not guaranteed to be stable.
pub struct DebugPrint<'a, S> {
    /// Context.
    ctx: &'a Context<S>,
    /// Root node of the (sub)tree to print.
    node: Option<NodeHandle>,
}

impl<'a, S: NodeIface> DebugPrint<'a, S> {
    /// Creates a new `DebugPrint` object for the node.
    pub(crate) fn new(ctx: &'a Context<S>, node: Option<NodeHandle>) -> Self {
        Self { ctx, node }
    }

    /// Writes the node and its descendants.
    fn write_subtree(
        &self,
        writer: &mut IndentWriter<'_, '_>,
        node: Option<NodeHandle>,
    ) -> fmt::Result {
        self.write_label(writer, node)?;

        let (node, kind) = match node.map(|node| (node, self.ctx.kind(node))) {
            Some((node, kind)) if kind.is_container() => (node, kind),
            _ => return Ok(()),
        };
        let size = self.ctx.size(node);
        for index in 0..size {
            writer.open_item(index + 1 == size)?;
            if kind == NodeKind::Object {
                match self.ctx.key_at(node, index) {
                    Some(key) => write!(writer, "{:?}: ", key)?,
                    None => writer.write_str("<no key>: ")?,
                }
            }
            self.write_subtree(writer, self.ctx.value_at(node, index))?;
            writer.close_item();
        }

        Ok(())
    }

    /// Writes the single-line label of the node.
    fn write_label(
        &self,
        writer: &mut IndentWriter<'_, '_>,
        node: Option<NodeHandle>,
    ) -> fmt::Result {
        let node = match node {
            Some(v) => v,
            None => return writer.write_str("null"),
        };
        let ctx = self.ctx;
        match ctx.kind(node) {
            kind @ (NodeKind::Object | NodeKind::Array) => {
                write!(writer, "{} ({})", kind, ctx.size(node))
            }
            NodeKind::String => write!(writer, "string {:?}", ctx.as_str(node)),
            NodeKind::Int => write!(writer, "int {}", ctx.as_int(node)),
            NodeKind::Uint => write!(writer, "uint {}", ctx.as_uint(node)),
            NodeKind::Float => write!(writer, "float {:?}", ctx.as_float(node)),
            NodeKind::Bool => write!(writer, "bool {}", ctx.as_bool(node)),
            kind => write!(writer, "{}", kind),
        }
    }
}

impl<S: NodeIface> fmt::Display for DebugPrint<'_, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut writer = IndentWriter::new(f);
        self.write_subtree(&mut writer, self.node)
    }
}

impl<S: NodeIface> fmt::Debug for DebugPrint<'_, S> {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::{ArenaTree, CallerHandle};

    #[test]
    fn nested_containers() {
        let mut ctx = Context::new(ArenaTree::new(), CallerHandle::NONE);
        let root = ctx.new_object(2);
        let name = ctx.new_string("x");
        let args = ctx.new_array(3);
        let inner = ctx.new_array(1);
        let one = ctx.new_int(-1);
        let flag = ctx.new_bool(true);
        ctx.set_key_value(root, "name", Some(name)).unwrap();
        ctx.set_key_value(root, "args", Some(args)).unwrap();
        ctx.set_value(args, 0, Some(inner)).unwrap();
        ctx.set_value(inner, 0, Some(one)).unwrap();
        ctx.set_value(args, 1, None).unwrap();
        ctx.set_value(args, 2, Some(flag)).unwrap();

        let expected = "\
object (2)
|-- \"name\": string \"x\"
`-- \"args\": array (3)
    |-- array (1)
    |   `-- int -1
    |-- null
    `-- bool true";
        assert_eq!(ctx.debug_print(Some(root)).to_string(), expected);
    }

    #[test]
    fn null_root() {
        let ctx = Context::new(ArenaTree::new(), CallerHandle::NONE);
        assert_eq!(ctx.debug_print(None).to_string(), "null");
    }

    #[test]
    fn empty_writes_leave_no_indent() {
        /// Writes a fixed sequence of fragments as one child item.
        struct Fragments(&'static [&'static str]);

        impl fmt::Display for Fragments {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                let mut writer = IndentWriter::new(f);
                writer.write_str("root")?;
                writer.open_item(true)?;
                for fragment in self.0 {
                    writer.write_str(fragment)?;
                }
                writer.close_item();
                Ok(())
            }
        }

        assert_eq!(Fragments(&["", "a", "", "b", ""]).to_string(), "root\n`-- ab");
        assert_eq!(Fragments(&[""]).to_string(), "root\n");
    }

    #[test]
    fn empty_key_and_string() {
        let mut ctx = Context::new(ArenaTree::new(), CallerHandle::NONE);
        let root = ctx.new_object(1);
        let empty = ctx.new_string("");
        ctx.set_key_value(root, "", Some(empty)).unwrap();

        assert_eq!(
            ctx.debug_print(Some(root)).to_string(),
            "object (1)\n`-- \"\": string \"\""
        );
    }
}
