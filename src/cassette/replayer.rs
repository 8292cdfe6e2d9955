//! Serves recorded interactions back in order.

use std::collections::{HashMap, VecDeque};

use super::format::{Cassette, Interaction};

/// One FIFO queue per `(port, method)` pair.
///
/// Calls to different methods may interleave differently on replay than
/// they did while recording; only the order within a method matters.
pub struct CassetteReplayer {
    queues: HashMap<(String, String), VecDeque<Interaction>>,
}

impl CassetteReplayer {
    /// Queues every interaction of `cassette`.
    #[must_use]
    pub fn new(cassette: &Cassette) -> Self {
        let mut queues: HashMap<(String, String), VecDeque<Interaction>> = HashMap::new();
        for interaction in &cassette.interactions {
            queues
                .entry((interaction.port.clone(), interaction.method.clone()))
                .or_default()
                .push_back(interaction.clone());
        }
        Self { queues }
    }

    /// Takes the next interaction recorded for `port`/`method`.
    ///
    /// # Panics
    ///
    /// Panics if nothing was recorded for the pair, or if its queue is
    /// used up. The message lists what the cassette does hold.
    pub fn next_interaction(&mut self, port: &str, method: &str) -> Interaction {
        let key = (port.to_string(), method.to_string());
        let Some(queue) = self.queues.get_mut(&key) else {
            let mut available: Vec<String> =
                self.queues.keys().map(|(p, m)| format!("{p}::{m}")).collect();
            available.sort();
            panic!(
                "Cassette exhausted: no interactions recorded for port={port:?} method={method:?}. \
                 Available port::method pairs: [{}]",
                available.join(", ")
            );
        };
        queue.pop_front().unwrap_or_else(|| {
            panic!(
                "Cassette exhausted: every interaction for port={port:?} method={method:?} \
                 has been consumed"
            )
        })
    }

    /// Interactions not yet served, across all pairs.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.queues.values().map(VecDeque::len).sum()
    }
}
