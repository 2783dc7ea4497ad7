use log::{debug, info};
use rand::Rng;
use soulguide_model::{KeywordEntry, Replies, ResponseTable};

mod builtin;

pub use builtin::builtin_table;

/// Source of uniform samples from `[0, 1)`.
///
/// Every [`rand::Rng`] is a `RandomSource`; tests can plug in fixed values.
pub trait RandomSource {
    fn next_unit(&mut self) -> f64;
}

impl<R: Rng> RandomSource for R {
    fn next_unit(&mut self) -> f64 {
        self.gen::<f64>()
    }
}

/// Picks canned replies for chat messages.
///
/// Keyword entries are tried in table order and the first keyword contained in
/// the lowercased message wins, even if later keywords match too. Messages
/// without any keyword get one of the default replies. Selection never fails.
#[derive(Debug, Clone)]
pub struct ResponseSelector {
    table: ResponseTable,
}

impl ResponseSelector {
    pub fn new(table: ResponseTable) -> Self {
        info!(
            "Responder ready: {} keywords, {} default replies",
            table.keywords.len(),
            table.default_replies.len()
        );
        Self { table }
    }

    pub fn table(&self) -> &ResponseTable {
        &self.table
    }

    pub fn select_response(&self, message: &str) -> &str {
        self.select_response_with(message, &mut rand::thread_rng())
    }

    pub fn select_response_with<R>(&self, message: &str, rng: &mut R) -> &str
    where
        R: RandomSource + ?Sized,
    {
        let replies = match self.matching_entry(message) {
            Some(entry) => {
                debug!("Message matched keyword \"{}\"", entry.keyword);
                &entry.replies
            }
            None => {
                debug!("No keyword matched, using default replies");
                &self.table.default_replies
            }
        };
        pick(replies, rng)
    }

    /// Entry whose replies would be used for `message`, `None` for defaults.
    pub fn matching_entry(&self, message: &str) -> Option<&KeywordEntry> {
        let normalized = message.to_lowercase();
        self.table
            .keywords
            .iter()
            .find(|entry| normalized.contains(entry.keyword.as_str()))
    }
}

impl Default for ResponseSelector {
    fn default() -> Self {
        ResponseSelector::new(builtin_table())
    }
}

fn pick<'a, R>(replies: &'a Replies, rng: &mut R) -> &'a str
where
    R: RandomSource + ?Sized,
{
    let n = replies.len();
    // `as usize` saturates, so negative or NaN samples land on 0
    let index = ((rng.next_unit() * n as f64).floor() as usize).min(n - 1);
    &replies[index]
}
