//! Bridges the blocking judge to the event loop.
//!
//! Each request runs on its own short-lived thread and reports back over a
//! channel. The main loop drains replies with `poll` and hands them to the
//! round session, which decides whether they are still current. Dropping
//! the runner orphans in-flight threads; their sends fail silently, which
//! is exactly the teardown behavior the session wants.

use super::{Verdict, WordJudge};
use crate::game::round::{BotPrompt, CheckRequest};
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Arc;
use std::thread;

/// A completed judge call, tagged with the round it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JudgeReply {
    /// Validation result for a player submission
    Checked {
        seq: u64,
        word: String,
        verdict: Verdict,
    },
    /// The bot's suggestion (possibly empty) after its thinking delay
    BotWord { seq: u64, word: String },
}

/// Owns the judge and the reply channel for one session.
pub struct JudgeRunner {
    judge: Arc<dyn WordJudge>,
    tx: Sender<JudgeReply>,
    rx: Receiver<JudgeReply>,
}

impl JudgeRunner {
    pub fn new(judge: Arc<dyn WordJudge>) -> Self {
        let (tx, rx) = channel();
        JudgeRunner { judge, tx, rx }
    }

    /// Validate a submission on a worker thread.
    pub fn spawn_check(&self, request: CheckRequest) {
        let judge = Arc::clone(&self.judge);
        let tx = self.tx.clone();
        thread::spawn(move || {
            let verdict = judge.check_word(&request.word, &request.category, request.letter);
            let _ = tx.send(JudgeReply::Checked {
                seq: request.seq,
                word: request.word,
                verdict,
            });
        });
    }

    /// Run the bot's move on a worker thread: sleep out the thinking
    /// delay, then ask for a suggestion.
    pub fn spawn_bot(&self, prompt: BotPrompt) {
        let judge = Arc::clone(&self.judge);
        let tx = self.tx.clone();
        thread::spawn(move || {
            thread::sleep(prompt.delay);
            let word = judge.suggest_word(&prompt.category, prompt.letter, &prompt.excluded);
            let _ = tx.send(JudgeReply::BotWord {
                seq: prompt.seq,
                word,
            });
        });
    }

    /// Drain all replies that have arrived so far.
    pub fn poll(&self) -> Vec<JudgeReply> {
        self.rx.try_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    /// Judge with canned answers, for exercising the thread plumbing.
    struct ScriptedJudge {
        verdict: Verdict,
        suggestion: String,
    }

    impl WordJudge for ScriptedJudge {
        fn check_word(&self, _word: &str, _category: &str, _letter: char) -> Verdict {
            self.verdict.clone()
        }

        fn suggest_word(&self, _category: &str, _letter: char, _excluded: &[String]) -> String {
            self.suggestion.clone()
        }
    }

    fn wait_for_reply(runner: &JudgeRunner) -> JudgeReply {
        for _ in 0..200 {
            if let Some(reply) = runner.poll().into_iter().next() {
                return reply;
            }
            thread::sleep(Duration::from_millis(5));
        }
        panic!("no judge reply within a second");
    }

    #[test]
    fn test_check_round_trip() {
        let runner = JudgeRunner::new(Arc::new(ScriptedJudge {
            verdict: Verdict::invalid("hayır"),
            suggestion: String::new(),
        }));
        runner.spawn_check(CheckRequest {
            seq: 3,
            word: "kedi".to_string(),
            category: "Hayvanlar".to_string(),
            letter: 'K',
        });

        let reply = wait_for_reply(&runner);
        assert_eq!(
            reply,
            JudgeReply::Checked {
                seq: 3,
                word: "kedi".to_string(),
                verdict: Verdict::invalid("hayır"),
            }
        );
    }

    #[test]
    fn test_bot_round_trip_after_delay() {
        let runner = JudgeRunner::new(Arc::new(ScriptedJudge {
            verdict: Verdict::valid(),
            suggestion: "masa".to_string(),
        }));
        runner.spawn_bot(BotPrompt {
            seq: 7,
            category: "Eşyalar".to_string(),
            letter: 'M',
            excluded: vec![],
            delay: Duration::from_millis(10),
        });

        let reply = wait_for_reply(&runner);
        assert_eq!(
            reply,
            JudgeReply::BotWord {
                seq: 7,
                word: "masa".to_string(),
            }
        );
    }

    #[test]
    fn test_poll_is_empty_without_requests() {
        let runner = JudgeRunner::new(Arc::new(ScriptedJudge {
            verdict: Verdict::valid(),
            suggestion: String::new(),
        }));
        assert!(runner.poll().is_empty());
    }
}
