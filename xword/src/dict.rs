//! The dictionary collaborator.
//!
//! The filler only needs one operation from a dictionary: stream every
//! word past a visitor. `WordList` is the bundled implementation, a
//! plain length-bucketed store; anything fancier (pattern lookup,
//! persistent formats) can sit behind the same trait.

use std::io::{self, BufRead};

use anyhow::{Result, bail};
use log::debug;

/// Longest word the filler will place.
pub const MAX_WORDLEN: usize = 15;
/// Shortest word the filler will place.
pub const MIN_WORDLEN: usize = 3;

pub trait Dictionary {
    /// Streams every word to the visitor, shortest words first. The
    /// stream may contain duplicates; the filler tolerates them.
    fn for_each_word(&self, visit: &mut dyn FnMut(&str));
}

/// A dictionary backed by one bucket of words per length.
#[derive(Clone, Debug)]
pub struct WordList {
    words: Vec<Vec<String>>,
}

impl Default for WordList {
    fn default() -> WordList {
        WordList::new()
    }
}

impl WordList {
    pub fn new() -> WordList {
        WordList { words: vec![Vec::new(); MAX_WORDLEN + 1] }
    }

    /// Adds one lowercase alphabetic word of admissible length.
    pub fn add(&mut self, word: &str) -> Result<()> {
        if word.len() > MAX_WORDLEN {
            bail!("word '{}' is longer than {} letters", word, MAX_WORDLEN);
        }
        if word.len() < MIN_WORDLEN {
            bail!("word '{}' is shorter than {} letters", word, MIN_WORDLEN);
        }
        if !word.bytes().all(|b| b.is_ascii_lowercase()) {
            bail!("word '{}' is not lowercase alphabetic", word);
        }
        self.words[word.len()].push(word.to_string());
        Ok(())
    }

    pub fn from_words<'a, I>(words: I) -> Result<WordList>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut list = WordList::new();
        for word in words {
            list.add(word)?;
        }
        Ok(list)
    }

    /// Loads a word-per-line file, lowercasing as it goes. Lines that
    /// are not admissible words are skipped rather than rejected, so a
    /// dictionary may carry annotations the filler does not understand.
    pub fn from_reader<R: io::Read>(reader: R) -> Result<WordList> {
        let mut list = WordList::new();
        let mut skipped = 0usize;
        for line in io::BufReader::new(reader).lines() {
            let line = line?;
            let word = line.trim().to_ascii_lowercase();
            if list.add(&word).is_err() {
                skipped += 1;
            }
        }
        debug!(
            "loaded {} words ({} lines skipped)",
            list.len(),
            skipped
        );
        Ok(list)
    }

    pub fn len(&self) -> usize {
        self.words.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.words.iter().all(Vec::is_empty)
    }
}

impl Dictionary for WordList {
    fn for_each_word(&self, visit: &mut dyn FnMut(&str)) {
        for bucket in &self.words {
            for word in bucket {
                visit(word);
            }
        }
    }
}
