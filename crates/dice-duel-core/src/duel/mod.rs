//! The duel state machine.
//!
//! A duel runs `TurnDetermination -> DiceSelection -> ComputerThrow ->
//! UserThrow -> Outcome`. Each phase is a value consumed by its transition,
//! which talks to the [`Console`] and yields the next phase. A help request
//! shows the probability table and repeats the same menu; an exit request
//! ends the duel from any phase.

mod config;
mod console;
mod phase;

pub use config::{DuelConfig, DEFAULT_MAX_ATTEMPTS};
pub use console::{Console, Event, Prompt, Reply};
pub use phase::{Assignment, Phase, Transition};

use crate::crypto::{Digest, Entropy, HmacSha256, KeyedHash, Opening, OsEntropy};
use crate::dice::{DicePool, ProbabilityMatrix, Selection};
use crate::protocol::{
    commit, Decision, DuelId, Player, ProtocolError, Purpose, Round, Transcript, Verdict,
};
use rand::seq::SliceRandom;
use rand::RngCore;
use std::io;
use thiserror::Error;
use tracing::{debug, info, info_span};

/// Errors that end a duel
#[derive(Debug, Error)]
pub enum DuelError {
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    #[error("console failure: {0}")]
    Console(#[from] io::Error),

    #[error("no valid selection after {attempts} attempts")]
    TooManyAttempts { attempts: usize },

    #[error("revealed value does not match its digest")]
    DigestMismatch,

    #[error("both players were assigned die #{position}")]
    SharedDie { position: usize },

    #[error("no die left to choose")]
    NoDieAvailable,
}

/// How a duel ended
#[derive(Debug)]
pub enum Conclusion {
    Finished {
        verdict: Verdict,
        transcript: Transcript,
    },
    /// The user asked to leave during `phase`
    Exited {
        phase: &'static str,
        transcript: Transcript,
    },
}

impl Conclusion {
    pub fn transcript(&self) -> &Transcript {
        match self {
            Conclusion::Finished { transcript, .. } | Conclusion::Exited { transcript, .. } => {
                transcript
            }
        }
    }
}

/// A fair-value round whose commitment has been opened
struct Exchange {
    purpose: Purpose,
    bound: u32,
    digest: Digest,
    opening: Opening,
    contribution: u32,
}

/// One duel session over a dice pool
pub struct Duel<'a> {
    id: DuelId,
    pool: &'a DicePool,
    config: DuelConfig,
    console: &'a mut dyn Console,
    entropy: Box<dyn Entropy + 'a>,
    mac: Box<dyn KeyedHash + 'a>,
    /// Only for the computer's free choice of die, never for commitments
    rng: Box<dyn RngCore + 'a>,
    matrix: Option<ProbabilityMatrix>,
    transcript: Transcript,
}

impl<'a> Duel<'a> {
    /// Duel with OS entropy, HMAC-SHA256 and the thread RNG
    pub fn new(pool: &'a DicePool, console: &'a mut dyn Console) -> Self {
        let id = DuelId::new();
        Self {
            id,
            pool,
            config: DuelConfig::default(),
            console,
            entropy: Box::new(OsEntropy),
            mac: Box::new(HmacSha256),
            rng: Box::new(rand::thread_rng()),
            matrix: None,
            transcript: Transcript::new(id, pool.iter().copied().collect()),
        }
    }

    pub fn with_config(mut self, config: DuelConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_entropy(mut self, entropy: impl Entropy + 'a) -> Self {
        self.entropy = Box::new(entropy);
        self
    }

    pub fn with_mac(mut self, mac: impl KeyedHash + 'a) -> Self {
        self.mac = Box::new(mac);
        self
    }

    pub fn with_rng(mut self, rng: impl RngCore + 'a) -> Self {
        self.rng = Box::new(rng);
        self
    }

    pub fn id(&self) -> DuelId {
        self.id
    }

    /// Play the duel through to its outcome or an exit request
    pub fn run(mut self) -> Result<Conclusion, DuelError> {
        let span = info_span!("duel", id = %self.id);
        let _guard = span.enter();

        self.console.notify(&Event::Started {
            duel_id: self.id,
            dice: self.pool.count(),
        })?;

        let mut phase = Phase::TurnDetermination;
        loop {
            let name = phase.name();
            debug!(phase = name, "entering phase");
            match phase.advance(&mut self)? {
                Transition::Next(next) => phase = next,
                Transition::Done(verdict) => {
                    return Ok(Conclusion::Finished {
                        verdict,
                        transcript: self.transcript,
                    })
                }
                Transition::Exit => {
                    info!(phase = name, "user left the duel");
                    return Ok(Conclusion::Exited {
                        phase: name,
                        transcript: self.transcript,
                    });
                }
            }
        }
    }

    /// Ask until the reply is one of `options`; `None` on an exit request
    fn choose(&mut self, prompt: Prompt, options: &[String]) -> Result<Option<usize>, DuelError> {
        for _ in 0..self.config.max_attempts {
            let rejected = match self.console.request_choice(prompt, options)? {
                Reply::Pick(index) if index < options.len() => return Ok(Some(index)),
                Reply::Pick(index) => index.to_string(),
                Reply::Unrecognized(input) => input,
                Reply::Exit => return Ok(None),
                Reply::Help => {
                    let pool = self.pool;
                    let matrix = self
                        .matrix
                        .get_or_insert_with(|| ProbabilityMatrix::compute(pool));
                    self.console.show_probabilities(pool, matrix)?;
                    continue;
                }
            };
            debug!(input = %rejected, options = options.len(), "selection rejected");
            self.console.notify(&Event::Rejected {
                input: rejected,
                options: options.len(),
            })?;
        }
        Err(DuelError::TooManyAttempts {
            attempts: self.config.max_attempts,
        })
    }

    /// Commit to a value in `[0, bound)`, collect the user's contribution
    /// from `[0, bound)`, then open the commitment
    fn fair_round(
        &mut self,
        purpose: Purpose,
        bound: u32,
        prompt: Prompt,
    ) -> Result<Option<Exchange>, DuelError> {
        let commitment = commit(bound, &mut *self.entropy, &*self.mac)?;
        let digest = *commitment.digest();
        self.console.notify(&Event::Committed {
            purpose,
            bound,
            digest,
        })?;

        let options: Vec<String> = (0..bound).map(|v| v.to_string()).collect();
        let Some(contribution) = self.choose(prompt, &options)? else {
            return Ok(None);
        };

        let opening = commitment.reveal();
        if !opening.verify(&digest, &*self.mac) {
            return Err(DuelError::DigestMismatch);
        }
        debug!(?purpose, value = opening.value, contribution, "commitment opened");
        self.console.notify(&Event::Revealed {
            purpose,
            value: opening.value,
            key: opening.key.clone(),
        })?;

        Ok(Some(Exchange {
            purpose,
            bound,
            digest,
            opening,
            contribution: contribution as u32,
        }))
    }

    fn record(&mut self, exchange: Exchange, decision: Decision) {
        self.transcript.record(Round {
            purpose: exchange.purpose,
            bound: exchange.bound,
            digest: exchange.digest,
            value: exchange.opening.value,
            key: exchange.opening.key,
            contribution: exchange.contribution,
            decision,
        });
    }

    /// The user picks from `menu`; returns the pool position
    fn pick_die(&mut self, menu: Selection<'a>) -> Result<Option<usize>, DuelError> {
        if menu.is_empty() {
            return Err(DuelError::NoDieAvailable);
        }
        let Some(index) = self.choose(Prompt::ChooseDie, &menu.labels())? else {
            return Ok(None);
        };
        let position = menu.resolve(index).ok_or(DuelError::NoDieAvailable)?;
        self.announce_die(Player::User, position)?;
        Ok(Some(position))
    }

    /// The computer picks uniformly from `menu`; returns the pool position
    fn draw_die(&mut self, menu: Selection<'a>) -> Result<usize, DuelError> {
        let position = *menu
            .positions()
            .choose(&mut *self.rng)
            .ok_or(DuelError::NoDieAvailable)?;
        self.announce_die(Player::Computer, position)?;
        Ok(position)
    }

    fn announce_die(&mut self, player: Player, position: usize) -> Result<(), DuelError> {
        let die = *self.pool.get(position).ok_or(DuelError::NoDieAvailable)?;
        debug!(%player, position, %die, "die chosen");
        self.console.notify(&Event::DieChosen {
            player,
            position,
            die,
        })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    /// Replays canned replies and remembers everything it was shown
    struct Scripted {
        replies: VecDeque<Reply>,
        prompts: Vec<(Prompt, Vec<String>)>,
        events: Vec<Event>,
        tables: usize,
    }

    impl Scripted {
        fn new(replies: Vec<Reply>) -> Self {
            Self {
                replies: replies.into(),
                prompts: Vec::new(),
                events: Vec::new(),
                tables: 0,
            }
        }
    }

    impl Console for Scripted {
        fn request_choice(&mut self, prompt: Prompt, options: &[String]) -> io::Result<Reply> {
            self.prompts.push((prompt, options.to_vec()));
            self.replies
                .pop_front()
                .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "script exhausted"))
        }

        fn show_probabilities(&mut self, pool: &DicePool, matrix: &ProbabilityMatrix) -> io::Result<()> {
            assert_eq!(matrix.size(), pool.count());
            self.tables += 1;
            Ok(())
        }

        fn notify(&mut self, event: &Event) -> io::Result<()> {
            self.events.push(event.clone());
            Ok(())
        }
    }

    fn pool() -> DicePool {
        DicePool::parse(&["2,2,4,4,9,9", "1,1,6,6,8,8", "3,3,5,5,7,7"]).unwrap()
    }

    #[test]
    fn test_exit_from_first_menu() {
        let pool = pool();
        let mut console = Scripted::new(vec![Reply::Exit]);
        let conclusion = Duel::new(&pool, &mut console).run().unwrap();

        match conclusion {
            Conclusion::Exited { phase, transcript } => {
                assert_eq!(phase, "turn-determination");
                assert!(transcript.rounds.is_empty());
            }
            other => panic!("expected exit, got {other:?}"),
        }
        // The digest went out, the key never did
        assert!(console
            .events
            .iter()
            .any(|e| matches!(e, Event::Committed { .. })));
        assert!(!console
            .events
            .iter()
            .any(|e| matches!(e, Event::Revealed { .. })));
    }

    #[test]
    fn test_help_repeats_same_menu() {
        let pool = pool();
        let mut console = Scripted::new(vec![Reply::Help, Reply::Help, Reply::Exit]);
        Duel::new(&pool, &mut console).run().unwrap();

        assert_eq!(console.tables, 2);
        assert_eq!(console.prompts.len(), 3);
        assert!(console.prompts.iter().all(|p| p == &console.prompts[0]));
    }

    #[test]
    fn test_rejected_input_reprompts() {
        let pool = pool();
        let mut console = Scripted::new(vec![
            Reply::Pick(7),
            Reply::Unrecognized("abc".to_string()),
            Reply::Exit,
        ]);
        Duel::new(&pool, &mut console).run().unwrap();

        let rejected: Vec<&Event> = console
            .events
            .iter()
            .filter(|e| matches!(e, Event::Rejected { .. }))
            .collect();
        assert_eq!(rejected.len(), 2);
        assert_eq!(
            rejected[0],
            &Event::Rejected {
                input: "7".to_string(),
                options: 2
            }
        );
    }

    #[test]
    fn test_reprompt_loop_is_bounded() {
        let pool = pool();
        let mut console = Scripted::new(vec![Reply::Pick(9); 5]);
        let config = DuelConfig {
            max_attempts: 3,
            ..DuelConfig::default()
        };
        let err = Duel::new(&pool, &mut console)
            .with_config(config)
            .run()
            .unwrap_err();

        assert!(matches!(err, DuelError::TooManyAttempts { attempts: 3 }));
        assert_eq!(console.prompts.len(), 3);
    }

    #[test]
    fn test_console_failure_ends_duel() {
        let pool = pool();
        let mut console = Scripted::new(vec![]);
        let err = Duel::new(&pool, &mut console).run().unwrap_err();
        assert!(matches!(err, DuelError::Console(_)));
    }

    #[test]
    fn test_full_duel_with_real_crypto() {
        let pool = pool();
        // guess, die (if asked), two summands; extra picks cover either branch
        let mut console = Scripted::new(vec![
            Reply::Pick(0),
            Reply::Pick(0),
            Reply::Pick(3),
            Reply::Pick(5),
        ]);
        let conclusion = Duel::new(&pool, &mut console).run().unwrap();

        let Conclusion::Finished {
            verdict,
            transcript,
        } = conclusion
        else {
            panic!("duel did not finish");
        };
        assert_eq!(transcript.rounds.len(), 3);
        assert!(transcript.verify(&HmacSha256));
        assert_eq!(transcript.verdict, Some(verdict));
    }
}
