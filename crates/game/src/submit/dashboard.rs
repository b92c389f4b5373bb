// Local submission aggregates and status note.

use super::{LocalSkip, SubmitOutcome};

/// Block explorer prefix for transaction links.
pub const EXPLORER_TX_URL: &str = "https://testnet.monadexplorer.com/tx/";

const DEFAULT_NOTE: &str = "Ready";

/// Running totals for this page session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dashboard {
    pub best: u64,
    pub total: u64,
    /// Submissions the relay answered: confirmed, skipped or duplicate.
    pub count: u32,
    pub last_tx: Option<String>,
    note: Option<String>,
}

impl Dashboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one outcome in.
    ///
    /// Only confirmed writes credit `best` and `total`. Failures and local
    /// skips change the note alone.
    pub fn apply(&mut self, outcome: &SubmitOutcome) {
        match outcome {
            SubmitOutcome::Confirmed { delta, tx_hash, .. } => {
                self.best = self.best.max(*delta);
                self.total += delta;
                self.count += 1;
                let note = match tx_hash {
                    Some(hash) => format!("Submitted +{} \u{2014} tx {}", delta, short_tx(hash)),
                    None => format!("Submitted +{}", delta),
                };
                if let Some(hash) = tx_hash {
                    self.last_tx = Some(hash.clone());
                }
                self.note = Some(note);
            }
            SubmitOutcome::Skipped => {
                self.count += 1;
                self.note = Some("Score was 0 \u{2014} skipped.".to_string());
            }
            SubmitOutcome::Duplicate => {
                self.count += 1;
                self.note = Some("Duplicate ignored.".to_string());
            }
            SubmitOutcome::Failed { last_error, .. } => {
                self.note = Some(format!("Retry failed: {}", last_error));
            }
            SubmitOutcome::NotSubmitted(LocalSkip::NothingScored) => {
                self.note = Some("Collect at least one orb to submit a score.".to_string());
            }
            // Submitting is disabled in the UI until the gate opens.
            SubmitOutcome::NotSubmitted(LocalSkip::NoIdentity) => {}
        }
    }

    pub fn status_note(&self) -> &str {
        self.note.as_deref().unwrap_or(DEFAULT_NOTE)
    }

    /// Shortened last transaction hash, or an em dash placeholder.
    pub fn last_tx_label(&self) -> String {
        self.last_tx.as_deref().map(short_tx).unwrap_or_else(|| "\u{2014}".to_string())
    }

    pub fn last_tx_url(&self) -> Option<String> {
        self.last_tx.as_deref().map(|hash| format!("{}{}", EXPLORER_TX_URL, hash))
    }
}

/// First six and last six characters joined by an ellipsis.
pub fn short_tx(hash: &str) -> String {
    let chars: Vec<char> = hash.chars().collect();
    if chars.len() <= 12 {
        return hash.to_string();
    }
    let head: String = chars[..6].iter().collect();
    let tail: String = chars[chars.len() - 6..].iter().collect();
    format!("{}\u{2026}{}", head, tail)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HASH: &str = "0xabcd0000000000000000000000000000000000000000000000000000ef0123";

    fn confirmed(delta: u64, tx: Option<&str>) -> SubmitOutcome {
        SubmitOutcome::Confirmed {
            delta,
            tx_hash: tx.map(str::to_string),
            block_number: Some(1),
        }
    }

    #[test]
    fn test_default_note() {
        let dash = Dashboard::new();
        assert_eq!(dash.status_note(), "Ready");
        assert_eq!(dash.last_tx_label(), "\u{2014}");
        assert_eq!(dash.last_tx_url(), None);
    }

    #[test]
    fn test_confirmed_updates_aggregates() {
        let mut dash = Dashboard::new();
        dash.apply(&confirmed(5, Some(HASH)));
        dash.apply(&confirmed(3, None));
        assert_eq!(dash.best, 5);
        assert_eq!(dash.total, 8);
        assert_eq!(dash.count, 2);
        assert_eq!(dash.status_note(), "Submitted +3");
        // A confirmation without a hash keeps the previous one.
        assert_eq!(dash.last_tx.as_deref(), Some(HASH));
        assert_eq!(dash.last_tx_label(), "0xabcd\u{2026}ef0123");
        assert_eq!(
            dash.last_tx_url().as_deref(),
            Some("https://testnet.monadexplorer.com/tx/0xabcd0000000000000000000000000000000000000000000000000000ef0123")
        );
    }

    #[test]
    fn test_success_note_shortens_hash() {
        let mut dash = Dashboard::new();
        dash.apply(&confirmed(7, Some(HASH)));
        assert_eq!(dash.status_note(), "Submitted +7 \u{2014} tx 0xabcd\u{2026}ef0123");
    }

    #[test]
    fn test_skip_and_duplicate_count_without_credit() {
        let mut dash = Dashboard::new();
        dash.apply(&SubmitOutcome::Skipped);
        assert_eq!(dash.status_note(), "Score was 0 \u{2014} skipped.");
        dash.apply(&SubmitOutcome::Duplicate);
        assert_eq!(dash.status_note(), "Duplicate ignored.");
        assert_eq!(dash.count, 2);
        assert_eq!((dash.best, dash.total), (0, 0));
    }

    #[test]
    fn test_failure_only_changes_note() {
        let mut dash = Dashboard::new();
        dash.apply(&confirmed(4, Some(HASH)));
        let before = dash.clone();
        dash.apply(&SubmitOutcome::Failed {
            last_error: "timeout".into(),
            attempts: 3,
        });
        assert_eq!(dash.status_note(), "Retry failed: timeout");
        assert_eq!((dash.best, dash.total, dash.count), (before.best, before.total, before.count));
        assert_eq!(dash.last_tx, before.last_tx);
    }

    #[test]
    fn test_local_nothing_scored_note() {
        let mut dash = Dashboard::new();
        dash.apply(&SubmitOutcome::NotSubmitted(LocalSkip::NothingScored));
        assert_eq!(dash.status_note(), "Collect at least one orb to submit a score.");
        assert_eq!(dash.count, 0);
    }
}
