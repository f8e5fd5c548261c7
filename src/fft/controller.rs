// src/fft/controller.rs

use super::agu::AddressGenerator;
use super::butterfly::butterfly;
use super::memory::PingPongMemory;
use super::plan::PrecisionPlan;
use super::twiddles::TwiddleTable;
use crate::common::{FftError, FftProcess, checked_log2};
use crate::minifloat::{ComplexMinifloat, Precision};

/// Controller states. Each call to [`FftEngine::step`] performs the work listed on the
/// current state and moves to the next one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// Waits for a start request and checks its size.
    Idle,
    /// Resets the address generator.
    Init,
    /// Presents `idxA` to the memory.
    ReadA,
    /// Captures A and presents `idxB`.
    WaitA,
    /// Waits out the read latency of B.
    ReadB,
    /// Captures B and evaluates the butterfly.
    WaitB,
    /// Writes X at `idxA`.
    Compute,
    /// Writes Y at `idxB`, retires the butterfly and swaps banks at the end of a stage.
    WriteX,
    /// Loops back to `ReadA`, or goes to `Done` after the last butterfly.
    WriteY,
    /// Raises `done` for one step.
    Done,
}

/// Output lines of one step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Signals {
    /// High for the single step that leaves `Done`.
    pub done: bool,
    /// High for the step that retired the last butterfly of a stage.
    pub done_stage: bool,
    /// Sticky configuration error, cleared only by [`FftEngine::reset`].
    pub config_error: bool,
}

#[derive(Debug, Clone, Copy)]
struct StartRequest {
    n: usize,
    plan: PrecisionPlan,
}

/// Sequential minifloat FFT engine.
///
/// Input must already sit at bit-reversed addresses. Each butterfly takes seven steps
/// (two reads with one step of latency each, compute, two writes, loop check) and a run
/// adds three steps of overhead, so an `N`-point run takes `7·(N/2)·log2(N) + 3` steps.
pub struct FftEngine {
    state: State,
    request: Option<StartRequest>,
    n: usize,
    plan: PrecisionPlan,
    agu: AddressGenerator,
    memory: PingPongMemory,
    twiddles: TwiddleTable,
    config_error: bool,
    steps: usize,
    input_precision: Precision,
    output_precision: Precision,
    a: ComplexMinifloat,
    b: ComplexMinifloat,
    x: ComplexMinifloat,
    y: ComplexMinifloat,
}

impl FftEngine {
    pub fn new() -> Self {
        let zero = ComplexMinifloat::zero(Precision::F8);
        Self {
            state: State::Idle,
            request: None,
            n: 0,
            plan: PrecisionPlan::default(),
            agu: AddressGenerator::default(),
            memory: PingPongMemory::new(),
            twiddles: TwiddleTable::new(),
            config_error: false,
            steps: 0,
            input_precision: Precision::F8,
            output_precision: Precision::F8,
            a: zero,
            b: zero,
            x: zero,
            y: zero,
        }
    }

    /// Aborts any run, clears the configuration error and zero-fills both banks.
    pub fn reset(&mut self) {
        let zero = ComplexMinifloat::zero(Precision::F8);
        self.state = State::Idle;
        self.request = None;
        self.agu.reset();
        self.memory.reset();
        self.config_error = false;
        self.steps = 0;
        self.input_precision = Precision::F8;
        self.output_precision = Precision::F8;
        self.a = zero;
        self.b = zero;
        self.x = zero;
        self.y = zero;
    }

    #[inline]
    pub fn state(&self) -> State {
        self.state
    }

    #[inline]
    pub fn is_busy(&self) -> bool {
        self.state != State::Idle || self.request.is_some()
    }

    #[inline]
    pub fn config_error(&self) -> bool {
        self.config_error
    }

    #[inline]
    pub fn agu(&self) -> &AddressGenerator {
        &self.agu
    }

    #[inline]
    pub fn memory(&self) -> &PingPongMemory {
        &self.memory
    }

    /// Precision the results of the last run are read back in.
    #[inline]
    pub fn output_precision(&self) -> Precision {
        self.output_precision
    }

    /// Writes `data` into the read bank, slot `i` taking `data[i]`.
    pub fn load(&mut self, data: &[ComplexMinifloat]) -> Result<(), FftError> {
        if self.is_busy() {
            return Err(FftError::Busy);
        }
        checked_log2(data.len())?;

        for (address, &value) in data.iter().enumerate() {
            self.memory.load(address, value);
        }
        self.n = data.len();
        self.input_precision = if data.iter().all(|v| v.precision() == Precision::F4) {
            Precision::F4
        } else {
            Precision::F8
        };
        self.output_precision = self.input_precision;
        Ok(())
    }

    /// Copies the read bank into `out`, in the output precision of the last run.
    pub fn read_output(&self, out: &mut [ComplexMinifloat]) -> Result<(), FftError> {
        if self.is_busy() {
            return Err(FftError::Busy);
        }
        if out.len() != self.n {
            return Err(FftError::SizeMismatch);
        }
        for (address, slot) in out.iter_mut().enumerate() {
            *slot = self.memory.peek(address, self.output_precision);
        }
        Ok(())
    }

    /// Requests a run. The size is checked when the controller leaves `Idle`; an
    /// unsupported size latches the configuration error there.
    pub fn start(&mut self, n: usize, plan: &PrecisionPlan) -> Result<(), FftError> {
        self.check_ready(n)?;
        if checked_log2(n).is_ok() {
            plan.validate_for(n)?;
        }
        self.request = Some(StartRequest { n, plan: *plan });
        Ok(())
    }

    /// Advances the controller by one step.
    pub fn step(&mut self) -> Signals {
        let mut signals = Signals::default();
        if self.state != State::Idle {
            self.steps += 1;
        }

        self.state = match self.state {
            State::Idle => match self.request.take() {
                Some(request) => self.accept(request),
                None => State::Idle,
            },
            State::Init => {
                self.agu.reset();
                State::ReadA
            }
            State::ReadA => {
                let addr = self.agu.addresses();
                self.memory.issue_read(addr.a, self.read_precision());
                State::WaitA
            }
            State::WaitA => {
                self.a = self.memory.data();
                let addr = self.agu.addresses();
                self.memory.issue_read(addr.b, self.read_precision());
                State::ReadB
            }
            State::ReadB => State::WaitB,
            State::WaitB => {
                self.b = self.memory.data();
                let precision = self.plan.stage(self.agu.stage());
                let addr = self.agu.addresses();
                let w = self.twiddles.lookup(addr.twiddle, self.n, precision.mult);
                let (x, y) = butterfly(self.a, self.b, w, precision);
                self.x = x;
                self.y = y;
                State::Compute
            }
            State::Compute => {
                let addr = self.agu.addresses();
                self.memory.write(addr.a, self.x);
                State::WriteX
            }
            State::WriteX => {
                let addr = self.agu.addresses();
                self.memory.write(addr.b, self.y);
                let stage = self.agu.stage();
                let pulse = self.agu.advance();
                if pulse.done_stage {
                    self.memory.swap();
                    signals.done_stage = true;
                    tracing::trace!(
                        stage,
                        read_bank = self.memory.read_bank(),
                        mult = %self.plan.stage(stage).mult,
                        add = %self.plan.stage(stage).add,
                        "stage complete"
                    );
                }
                State::WriteY
            }
            State::WriteY => {
                if self.agu.done_fft() {
                    State::Done
                } else {
                    State::ReadA
                }
            }
            State::Done => {
                // The read bank now holds the results, which become the next run's input.
                if let Some(precision) = self.plan.output_precision() {
                    self.output_precision = precision;
                    self.input_precision = precision;
                }
                signals.done = true;
                tracing::debug!(
                    n = self.n,
                    steps = self.steps,
                    output = %self.output_precision,
                    "fft done"
                );
                State::Idle
            }
        };

        self.memory.clock();
        signals.config_error = self.config_error;
        signals
    }

    /// Starts a run and steps it to completion. Returns the number of steps taken.
    pub fn run(&mut self, n: usize, plan: &PrecisionPlan) -> Result<usize, FftError> {
        self.start(n, plan)?;
        let mut steps = 0;
        loop {
            let signals = self.step();
            steps += 1;
            if signals.config_error {
                return Err(FftError::UnsupportedSize(n));
            }
            if signals.done {
                return Ok(steps);
            }
        }
    }

    /// Refuses a new run while the configuration error is latched or a run is in flight.
    fn check_ready(&self, n: usize) -> Result<(), FftError> {
        if self.config_error {
            tracing::warn!(n, "start refused: configuration error latched");
            return Err(FftError::ConfigurationLocked);
        }
        if self.is_busy() {
            tracing::warn!(n, state = ?self.state, "start refused: engine busy");
            return Err(FftError::Busy);
        }
        Ok(())
    }

    fn latch_config_error(&mut self, n: usize) {
        tracing::warn!(n, "unsupported fft size, configuration error latched");
        self.config_error = true;
    }

    fn accept(&mut self, request: StartRequest) -> State {
        match AddressGenerator::new(request.n) {
            Ok(agu) => self.agu = agu,
            Err(_) => {
                self.latch_config_error(request.n);
                return State::Idle;
            }
        }
        self.n = request.n;
        self.plan = request.plan;
        self.steps = 1;
        tracing::debug!(n = request.n, stages = request.plan.len(), "fft start");
        State::Init
    }

    /// Precision of the field the previous stage (or the host) wrote.
    fn read_precision(&self) -> Precision {
        match self.agu.stage() {
            0 => self.input_precision,
            stage => self.plan.stage(stage - 1).add,
        }
    }
}

impl Default for FftEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl FftProcess<ComplexMinifloat> for FftEngine {
    /// Transforms `buffer` in place. `buffer` must be in bit-reversed order; the result
    /// is in natural order and in the plan's output precision.
    fn process(&mut self, buffer: &mut [ComplexMinifloat], plan: &PrecisionPlan) -> Result<(), FftError> {
        let n = buffer.len();
        self.check_ready(n)?;
        if let Err(err) = checked_log2(n) {
            self.latch_config_error(n);
            return Err(err);
        }
        self.load(buffer)?;
        self.run(buffer.len(), plan)?;
        self.read_output(buffer)
    }
}

#[cfg(test)]
#[path = "controller_tests.rs"]
mod tests;
