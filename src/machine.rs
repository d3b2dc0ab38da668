//! This module defines the `MarkovMachine` struct, which executes a Markov program. It owns the
//! tape and rule table, applies one rule per step, and enforces the step bound in `run`.

use tracing::{debug, trace, warn};

use crate::matcher::find_match;
use crate::rewriter::apply;
use crate::rules::RuleTable;
use crate::tape::Tape;
use crate::types::{ExecutionState, Halt, MarkovError, Program, RunReport, Step};

/// Executes a Markov program.
///
/// The machine starts `Running` on the program's initial tape. Each step applies the first
/// matching rule; a terminal rule or an unmatched tape halts it, and halted states are
/// absorbing until the tape is replaced with [`set_tape`](Self::set_tape) or
/// [`reset`](Self::reset).
#[derive(Debug, Clone)]
pub struct MarkovMachine {
    program: Program,
    tape: Tape,
    state: ExecutionState,
    step_count: usize,
}

impl MarkovMachine {
    /// Creates a new `MarkovMachine` positioned at the program's initial tape.
    pub fn new(program: Program) -> Self {
        Self {
            tape: program.tape.clone(),
            program,
            state: ExecutionState::Running,
            step_count: 0,
        }
    }

    /// Executes a single rewrite.
    ///
    /// # Returns
    ///
    /// * `Ok(Step::Continue)` if a non-terminal rule was applied.
    /// * `Ok(Step::Halt(Halt::Normal))` if a terminal rule was applied.
    /// * `Ok(Step::Halt(Halt::Stuck))` if no rule matches the tape.
    /// * `Ok(Step::Halt(_))` with the existing halt if the machine was already halted.
    /// * `Err(MarkovError::TapeOverflow)` if the rewrite would exceed the tape capacity.
    ///   The tape is left as it was.
    pub fn step(&mut self) -> Result<Step, MarkovError> {
        if let ExecutionState::Halted(halt) = self.state {
            return Ok(Step::Halt(halt));
        }

        let Some(found) = find_match(self.tape.as_str(), &self.program.rules) else {
            debug!(tape = %self.tape, steps = self.step_count, "no rule matches");
            self.state = ExecutionState::Halted(Halt::Stuck);
            return Ok(Step::Halt(Halt::Stuck));
        };

        self.tape = apply(&self.tape, found.rule, found.position)?;
        self.step_count += 1;
        trace!(rule = found.index, position = found.position, tape = %self.tape, "applied rule");

        if found.rule.is_terminal() {
            debug!(
                rule = found.index,
                steps = self.step_count,
                "terminal rule applied"
            );
            self.state = ExecutionState::Halted(Halt::Normal);
            return Ok(Step::Halt(Halt::Normal));
        }

        Ok(Step::Continue)
    }

    /// Runs the machine until it halts or performs `step_bound` rewrites.
    pub fn run(&mut self, step_bound: usize) -> Result<RunReport, MarkovError> {
        self.run_with_trace(step_bound, |_, _| {})
    }

    /// Runs the machine like [`run`](Self::run), calling `trace` with the step number and the
    /// new tape after every rewrite.
    ///
    /// A machine still `Running` after `step_bound` rewrites halts as `Divergent`, even if no
    /// rule would match on the next step. A machine that is already halted returns its halt
    /// immediately without calling `trace`.
    pub fn run_with_trace<F>(
        &mut self,
        step_bound: usize,
        mut trace: F,
    ) -> Result<RunReport, MarkovError>
    where
        F: FnMut(usize, &str),
    {
        let start = self.step_count;

        while self.step_count - start < step_bound {
            match self.step()? {
                Step::Continue => trace(self.step_count, self.tape.as_str()),
                Step::Halt(halt) => {
                    if halt == Halt::Normal && self.step_count > start {
                        trace(self.step_count, self.tape.as_str());
                    }
                    return Ok(self.report(halt, start));
                }
            }
        }

        let halt = match self.state {
            ExecutionState::Halted(halt) => halt,
            ExecutionState::Running => {
                warn!(step_bound, tape_len = self.tape.len(), "step bound reached");
                self.state = ExecutionState::Halted(Halt::Divergent);
                Halt::Divergent
            }
        };

        Ok(self.report(halt, start))
    }

    fn report(&self, halt: Halt, start: usize) -> RunReport {
        RunReport {
            halt,
            steps: self.step_count - start,
            tape: self.tape.as_str().to_string(),
        }
    }

    /// Replaces the tape, clears any halt, and resets the step count. Rules are kept.
    ///
    /// # Returns
    ///
    /// * `Err(MarkovError::TapeOverflow)` if `content` exceeds the tape capacity. The machine
    ///   is left unchanged.
    pub fn set_tape(&mut self, content: &str) -> Result<(), MarkovError> {
        self.tape = Tape::new(content, self.tape.capacity())?;
        self.state = ExecutionState::Running;
        self.step_count = 0;
        Ok(())
    }

    /// Resets the machine to the program's initial tape.
    pub fn reset(&mut self) {
        self.tape = self.program.tape.clone();
        self.state = ExecutionState::Running;
        self.step_count = 0;
    }

    /// Returns the current tape content.
    pub fn tape(&self) -> &str {
        self.tape.as_str()
    }

    pub fn state(&self) -> ExecutionState {
        self.state
    }

    pub fn is_halted(&self) -> bool {
        matches!(self.state, ExecutionState::Halted(_))
    }

    /// Returns the number of rewrites since the last reset.
    pub fn step_count(&self) -> usize {
        self.step_count
    }

    pub fn rules(&self) -> &RuleTable {
        &self.program.rules
    }

    pub fn program(&self) -> &Program {
        &self.program
    }
}

impl Default for MarkovMachine {
    fn default() -> Self {
        Self::new(Program::new(Tape::default(), RuleTable::default()))
    }
}
