//! Working representation of a text segment while passes run over it.
//!
//! The segment is a sequence of raw text and protected nodes. Raw text is
//! what later passes may still rewrite; a protected node is a placeholder
//! for an already-rendered snippet held in the [`Vault`]. Passes only ever
//! look at raw text, so a snippet can't be re-escaped or re-matched.

use std::mem;
use std::ops::Range;

use regex::{Captures, Regex};

/// Index of a protected snippet in the [`Vault`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Placeholder(usize);

impl Placeholder {
    pub const fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Raw(String),
    Protected(Placeholder),
}

/// Storage for protected snippets, indexed by [`Placeholder`].
#[derive(Debug, Default)]
pub struct Vault {
    snippets: Vec<Option<String>>,
}

impl Vault {
    /// Store `snippet` and return the node standing in for it.
    pub fn protect(&mut self, snippet: impl Into<String>) -> Node {
        let placeholder = Placeholder(self.snippets.len());
        self.snippets.push(Some(snippet.into()));
        Node::Protected(placeholder)
    }

    /// Remove and return a snippet. A second take of the same placeholder
    /// yields an empty string.
    pub fn take(&mut self, placeholder: Placeholder) -> String {
        self.snippets
            .get_mut(placeholder.index())
            .and_then(Option::take)
            .unwrap_or_default()
    }

    /// Flatten `nodes` to a string, taking each protected snippet.
    pub fn resolve(&mut self, nodes: Vec<Node>) -> String {
        let mut out = String::new();
        for node in nodes {
            match node {
                Node::Raw(text) => out.push_str(&text),
                Node::Protected(placeholder) => out.push_str(&self.take(placeholder)),
            }
        }
        out
    }
}

/// Appends nodes while merging neighbouring raw text.
#[derive(Debug, Default)]
struct NodeBuilder {
    nodes: Vec<Node>,
    text: String,
}

impl NodeBuilder {
    fn push_str(&mut self, text: &str) {
        self.text.push_str(text);
    }

    fn push_char(&mut self, ch: char) {
        self.text.push(ch);
    }

    fn push_placeholder(&mut self, placeholder: Placeholder) {
        self.flush();
        self.nodes.push(Node::Protected(placeholder));
    }

    fn push_node(&mut self, node: Node) {
        match node {
            Node::Raw(text) => self.push_str(&text),
            Node::Protected(placeholder) => self.push_placeholder(placeholder),
        }
    }

    fn flush(&mut self) {
        if !self.text.is_empty() {
            self.nodes.push(Node::Raw(mem::take(&mut self.text)));
        }
    }

    fn finish(mut self) -> Vec<Node> {
        self.flush();
        self.nodes
    }
}

/// A single character of raw text or a whole protected node.
///
/// A shielded character is ordinary content that can never act as a
/// delimiter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Atom {
    Char(char),
    Shielded(char),
    Protected(Placeholder),
}

fn atomize(nodes: Vec<Node>, shield: Option<&Regex>) -> Vec<Atom> {
    let mut atoms = Vec::new();
    for node in nodes {
        match node {
            Node::Raw(text) => {
                let shielded: Vec<Range<usize>> = shield
                    .map(|pattern| pattern.find_iter(&text).map(|m| m.range()).collect())
                    .unwrap_or_default();
                atoms.extend(text.char_indices().map(|(at, ch)| {
                    if shielded.iter().any(|range| range.contains(&at)) {
                        Atom::Shielded(ch)
                    } else {
                        Atom::Char(ch)
                    }
                }));
            }
            Node::Protected(placeholder) => atoms.push(Atom::Protected(placeholder)),
        }
    }
    atoms
}

fn nodes_from_atoms(atoms: &[Atom]) -> Vec<Node> {
    let mut builder = NodeBuilder::default();
    for atom in atoms {
        match *atom {
            Atom::Char(ch) | Atom::Shielded(ch) => builder.push_char(ch),
            Atom::Protected(placeholder) => builder.push_placeholder(placeholder),
        }
    }
    builder.finish()
}

/// Index of the delimiter closing the span that opens just before `start`.
///
/// The span must be non-empty and may not contain the delimiter or a newline;
/// protected nodes count as ordinary content.
fn closing_delimiter(atoms: &[Atom], start: usize, delim: char) -> Option<usize> {
    for (offset, atom) in atoms.iter().enumerate().skip(start) {
        match *atom {
            Atom::Char(ch) if ch == delim => return (offset > start).then_some(offset),
            Atom::Char('\n') => return None,
            _ => {}
        }
    }
    None
}

/// A text segment under transformation.
#[derive(Debug, Default)]
pub struct WorkingText {
    nodes: Vec<Node>,
    vault: Vault,
}

impl WorkingText {
    pub fn new(text: &str) -> Self {
        let mut builder = NodeBuilder::default();
        builder.push_str(text);
        Self {
            nodes: builder.finish(),
            vault: Vault::default(),
        }
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Rewrite every raw node with `f`.
    pub fn map_raw<F>(&mut self, mut f: F)
    where
        F: FnMut(&str, &mut Vault) -> Vec<Node>,
    {
        let mut builder = NodeBuilder::default();
        for node in mem::take(&mut self.nodes) {
            match node {
                Node::Raw(text) => {
                    for replacement in f(&text, &mut self.vault) {
                        builder.push_node(replacement);
                    }
                }
                Node::Protected(placeholder) => builder.push_placeholder(placeholder),
            }
        }
        self.nodes = builder.finish();
    }

    /// Replace every match of `pattern` inside raw text with the node `f`
    /// builds from it.
    pub fn replace_matches<F>(&mut self, pattern: &Regex, mut f: F)
    where
        F: FnMut(&Captures<'_>, &mut Vault) -> Node,
    {
        self.map_raw(|text, vault| {
            let mut out = Vec::new();
            let mut last = 0;
            for caps in pattern.captures_iter(text) {
                let Some(whole) = caps.get(0) else { continue };
                out.push(Node::Raw(text[last..whole.start()].to_string()));
                out.push(f(&caps, vault));
                last = whole.end();
            }
            out.push(Node::Raw(text[last..].to_string()));
            out
        });
    }

    /// Find balanced `delim` pairs, leftmost first and non-overlapping, and
    /// hand each enclosed run of nodes to `wrap`. The delimiters are dropped.
    ///
    /// A span may cross protected nodes but never a newline.
    pub fn replace_delimited<F>(&mut self, delim: char, wrap: F)
    where
        F: FnMut(Vec<Node>, &mut Vault) -> Vec<Node>,
    {
        self.delimit(delim, None, wrap);
    }

    /// Like [`replace_delimited`](Self::replace_delimited), but a delimiter
    /// inside raw text matched by `shield` neither opens nor closes a span.
    pub fn replace_delimited_outside<F>(&mut self, delim: char, shield: &Regex, wrap: F)
    where
        F: FnMut(Vec<Node>, &mut Vault) -> Vec<Node>,
    {
        self.delimit(delim, Some(shield), wrap);
    }

    fn delimit<F>(&mut self, delim: char, shield: Option<&Regex>, mut wrap: F)
    where
        F: FnMut(Vec<Node>, &mut Vault) -> Vec<Node>,
    {
        let atoms = atomize(mem::take(&mut self.nodes), shield);
        let mut builder = NodeBuilder::default();
        let mut i = 0;
        while i < atoms.len() {
            if atoms[i] == Atom::Char(delim)
                && let Some(close) = closing_delimiter(&atoms, i + 1, delim)
            {
                let inner = nodes_from_atoms(&atoms[i + 1..close]);
                for node in wrap(inner, &mut self.vault) {
                    builder.push_node(node);
                }
                i = close + 1;
                continue;
            }
            match atoms[i] {
                Atom::Char(ch) | Atom::Shielded(ch) => builder.push_char(ch),
                Atom::Protected(placeholder) => builder.push_placeholder(placeholder),
            }
            i += 1;
        }
        self.nodes = builder.finish();
    }

    /// Run `f` over each line; lines are rejoined with `\n`.
    pub fn map_lines<F>(&mut self, mut f: F)
    where
        F: FnMut(Vec<Node>, &mut Vault) -> Vec<Node>,
    {
        let mut lines: Vec<Vec<Node>> = vec![Vec::new()];
        for node in mem::take(&mut self.nodes) {
            match node {
                Node::Raw(text) => {
                    for (n, piece) in text.split('\n').enumerate() {
                        if n > 0 {
                            lines.push(Vec::new());
                        }
                        if !piece.is_empty()
                            && let Some(line) = lines.last_mut()
                        {
                            line.push(Node::Raw(piece.to_string()));
                        }
                    }
                }
                Node::Protected(placeholder) => {
                    if let Some(line) = lines.last_mut() {
                        line.push(Node::Protected(placeholder));
                    }
                }
            }
        }

        let mut builder = NodeBuilder::default();
        for (n, line) in lines.into_iter().enumerate() {
            if n > 0 {
                builder.push_char('\n');
            }
            for node in f(line, &mut self.vault) {
                builder.push_node(node);
            }
        }
        self.nodes = builder.finish();
    }

    /// Substitute every placeholder with its snippet.
    pub fn restore(mut self) -> String {
        let nodes = mem::take(&mut self.nodes);
        self.vault.resolve(nodes)
    }
}
