//! A loaded documentation set.

use crate::book::manifest::BookManifest;
use crate::index::association::AssociationIndex;
use crate::locator::Locator;
use crate::toc::tree::{TocNode, TocTree};
use crate::word::Word;

/// Identifier of a book inside a registry.
pub type BookId = String;

/// One independently indexed book: its TOC, its association index and the
/// manifest it was loaded from. A `Book` is immutable once built.
#[derive(Debug)]
pub struct Book {
    id: BookId,
    title: String,
    toc: TocTree,
    index: AssociationIndex,
    manifest: BookManifest,
}

impl Book {
    /// Assemble a book from already built parts.
    pub fn new<I: Into<BookId>, T: Into<String>>(
        id: I,
        title: T,
        toc: TocTree,
        index: AssociationIndex,
    ) -> Self {
        let id = id.into();
        let title = title.into();
        let manifest = BookManifest::new(id.clone(), title.clone());
        Book {
            id,
            title,
            toc,
            index,
            manifest,
        }
    }

    /// Assemble a book and keep the manifest it was described by.
    pub fn from_manifest(manifest: BookManifest, toc: TocTree, index: AssociationIndex) -> Self {
        Book {
            id: manifest.id.clone(),
            title: manifest.title.clone(),
            toc,
            index,
            manifest,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn toc(&self) -> &TocTree {
        &self.toc
    }

    pub fn index(&self) -> &AssociationIndex {
        &self.index
    }

    pub fn manifest(&self) -> &BookManifest {
        &self.manifest
    }

    /// First TOC entry (pre-order) whose title mentions one of `words`.
    ///
    /// Titles are compared word by word after case folding, so `MAC` in a
    /// title matches the index word `mac` but `MACRO` does not.
    pub fn entry_for_words<'a, I>(&self, words: I) -> Option<&TocNode>
    where
        I: IntoIterator<Item = &'a Word>,
        I::IntoIter: Clone,
    {
        let words = words.into_iter();
        self.toc.flatten().map(|(_, node)| node).find(|node| {
            node.locator().is_some() && title_mentions(node.title(), words.clone())
        })
    }

    /// Locator of [`Book::entry_for_words`].
    pub fn locate<'a, I>(&self, words: I) -> Option<Locator>
    where
        I: IntoIterator<Item = &'a Word>,
        I::IntoIter: Clone,
    {
        self.entry_for_words(words)
            .and_then(|node| node.locator().cloned())
    }
}

fn title_mentions<'a, I>(title: &str, mut words: I) -> bool
where
    I: Iterator<Item = &'a Word>,
{
    let folded = title.to_lowercase();
    let tokens: Vec<&str> = folded
        .split(|c: char| c.is_whitespace() || matches!(c, '(' | ')' | ',' | ':' | ';' | '/'))
        .filter(|token| !token.is_empty())
        .collect();
    words.any(|word| tokens.contains(&word.as_str()))
}
