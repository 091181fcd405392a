use std::mem;

use ego_tree::iter::Edge;
use log::debug;
use scraper::{node::Element, Html, Node};

use crate::schema::Genre;

pub const CONTAINER_TAG: &str = "div";
pub const GROUP_CLASS: &str = "checkbox-group";
pub const ITEM_CLASS: &str = "checkbox";

/// An opening tag as seen by [`GenreScanner`].
#[derive(Clone, Debug)]
pub struct Tag<'a> {
    name: &'a str,
    attrs: Vec<(&'a str, &'a str)>,
}

impl<'a> Tag<'a> {
    pub fn new(name: &'a str, attrs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self {
            name,
            attrs: attrs.into_iter().collect(),
        }
    }

    pub fn name(&self) -> &'a str {
        self.name
    }

    pub fn attr(&self, name: &str) -> Option<&'a str> {
        // First occurrence wins, matching how html5ever drops duplicate attributes
        self.attrs
            .iter()
            .find(|&&(key, _)| key == name)
            .map(|&(_, value)| value)
    }

    fn class_contains(&self, marker: &str) -> bool {
        self.attr("class").map_or(false, |class| class.contains(marker))
    }
}

impl<'a> From<&'a Element> for Tag<'a> {
    fn from(element: &'a Element) -> Self {
        Self::new(element.name(), element.attrs())
    }
}

#[derive(Clone, Debug)]
pub enum Token<'a> {
    Open(Tag<'a>),
    Close(&'a str),
    Text(&'a str),
}

#[derive(Debug, Default)]
struct Candidate {
    id: Option<String>,
    name: Option<String>,
}

impl Candidate {
    fn observe(&mut self, tag: &Tag) {
        if tag.name() != "input" || tag.attr("type") != Some("checkbox") {
            return;
        }
        if let Some(value) = tag.attr("value") {
            self.id = Some(value.to_owned());
        }
    }
}

#[derive(Debug, Default)]
enum State {
    #[default]
    Idle,
    InGroup,
    InItem(Candidate),
    InLabel(Candidate),
}

/// Collects `(id, name)` pairs from the checkboxes of the first
/// `div.checkbox-group` in a token stream.
///
/// Unbalanced input is accepted: a closing tag that does not match the
/// current state is ignored.
#[derive(Debug, Default)]
pub struct GenreScanner {
    group_found: bool,
    state: State,
    genres: Vec<Genre>,
}

impl GenreScanner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn feed(&mut self, token: Token) {
        match token {
            Token::Open(tag) => self.open(&tag),
            Token::Close(name) => self.close(name),
            Token::Text(text) => self.text(text),
        }
    }

    pub fn finish(self) -> Vec<Genre> {
        self.genres
    }

    fn open(&mut self, tag: &Tag) {
        let is_container = tag.name() == CONTAINER_TAG;
        if is_container && !self.group_found && tag.class_contains(GROUP_CLASS) {
            self.group_found = true;
            self.state = State::InGroup;
            return;
        }
        let is_item = is_container && tag.class_contains(ITEM_CLASS);
        self.state = match mem::take(&mut self.state) {
            State::Idle => State::Idle,
            State::InGroup if is_item => State::InItem(Candidate::default()),
            State::InGroup => State::InGroup,
            // A nested item restarts the candidate but keeps the label flag.
            State::InItem(_) if is_item => State::InItem(Candidate::default()),
            State::InLabel(_) if is_item => State::InLabel(Candidate::default()),
            State::InItem(candidate) if tag.name() == "label" => State::InLabel(candidate),
            State::InItem(mut candidate) => {
                candidate.observe(tag);
                State::InItem(candidate)
            }
            State::InLabel(mut candidate) => {
                candidate.observe(tag);
                State::InLabel(candidate)
            }
        };
    }

    fn close(&mut self, name: &str) {
        match mem::take(&mut self.state) {
            State::InItem(candidate) | State::InLabel(candidate) if name == CONTAINER_TAG => {
                if let Some(genre) = candidate
                    .id
                    .zip(candidate.name)
                    .and_then(|(id, name)| Genre::new(id, &name))
                {
                    debug!("Found genre {:?} ({:?})", genre.name, genre.id);
                    self.genres.push(genre);
                }
                self.state = State::InGroup;
            }
            State::InGroup if name == CONTAINER_TAG => {
                self.state = State::Idle;
            }
            State::InLabel(candidate) if name == "label" => {
                self.state = State::InItem(candidate);
            }
            state => self.state = state,
        }
    }

    fn text(&mut self, text: &str) {
        if let State::InLabel(candidate) = &mut self.state {
            candidate.name.get_or_insert_with(String::new).push_str(text);
        }
    }
}

/// Parses `document` as HTML and scans it in document order.
pub fn scan_document(document: &str) -> Vec<Genre> {
    let html = Html::parse_document(document);
    scan_html(&html)
}

pub fn scan_html(html: &Html) -> Vec<Genre> {
    let mut scanner = GenreScanner::new();
    for edge in html.tree.root().traverse() {
        match edge {
            Edge::Open(node) => match node.value() {
                Node::Element(element) => scanner.feed(Token::Open(element.into())),
                Node::Text(text) => scanner.feed(Token::Text(text)),
                _ => {}
            },
            Edge::Close(node) => {
                if let Node::Element(element) = node.value() {
                    scanner.feed(Token::Close(element.name()));
                }
            }
        }
    }
    scanner.finish()
}
