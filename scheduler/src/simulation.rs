use std::collections::VecDeque;

use log::{debug, trace};

use crate::notifier::CompletionNotifier;
use crate::{
    build, Collector, ConfigError, Endpoint, Pid, Process, ProcessBlock, ProcessControlBlock, ReadyQueue, Registrar,
    Scheduler, SchedulerConfig, SimulationError, Timestamp,
};

/// Reference tick driver
///
/// Owns one scheduler instance together with everything it works on: the
/// ready queue, the CPU slot and the processes that were registered but
/// have not arrived yet. Every [`Simulation::step`] admits the arrivals due
/// at the current time, runs one scheduling round and moves the clock one
/// tick forward.
pub struct Simulation<S: Scheduler, N: CompletionNotifier> {
    scheduler: S,
    notifier: N,
    registrar: Registrar,
    ready: ReadyQueue,
    running: Option<ProcessBlock>,
    /// Registered processes waiting for their arrival time, sorted by it
    pending: VecDeque<(Timestamp, ProcessBlock)>,
    now: Timestamp,
    /// Time of the last scheduling round
    last_tick: Timestamp,
    tick: u32,
    ticks: u64,
}

impl<S: Scheduler, N: CompletionNotifier> Simulation<S, N> {
    /// Creates a simulation starting at time 0
    ///
    /// * `scheduler` - the policy to drive
    /// * `notifier` - receives the completion messages
    /// * `tick` - how far the clock moves on every step, in milliseconds;
    ///            must match the tick the scheduler was built with
    pub fn new(scheduler: S, notifier: N, tick: u32) -> Simulation<S, N> {
        Simulation {
            scheduler,
            notifier,
            registrar: Registrar::new(),
            ready: ReadyQueue::new(),
            running: None,
            pending: VecDeque::new(),
            now: Timestamp::new(0),
            last_tick: Timestamp::new(0),
            tick,
            ticks: 0,
        }
    }

    /// Registers a process that becomes ready at `arrival`
    ///
    /// Processes arriving at the same time enter the ready queue in the
    /// order they were submitted.
    pub fn submit(&mut self, arrival: Timestamp, burst_time: u32, endpoint: Endpoint) -> Pid {
        let pcb = self.registrar.register(burst_time, endpoint);
        let pid = pcb.get_pid();

        let at = self
            .pending
            .iter()
            .position(|(due, _)| *due > arrival)
            .unwrap_or(self.pending.len());
        self.pending.insert(at, (arrival, pcb));

        debug!("registered process {} ({}ms) arriving at {}", pid, burst_time, arrival);
        pid
    }

    fn admit_arrivals(&mut self) {
        while let Some((due, _)) = self.pending.front() {
            if *due > self.now {
                break;
            }

            if let Some((_, pcb)) = self.pending.pop_front() {
                trace!("process {} arrived at {}", pcb.get_pid(), self.now);
                self.ready.push_back(pcb);
            }
        }
    }

    /// Runs one tick
    pub fn step(&mut self) {
        self.admit_arrivals();

        self.scheduler
            .schedule(self.now, &mut self.ready, &mut self.running, &mut self.notifier);

        self.last_tick = self.now;
        self.now = self.now + self.tick;
        self.ticks += 1;
    }

    /// Steps until every registered process finished
    ///
    /// Returns the time of the last scheduling round.
    ///
    /// * `max_ticks` - how many steps to try before giving up
    pub fn run(&mut self, max_ticks: u64) -> Result<Timestamp, SimulationError> {
        let mut budget = max_ticks;

        while !self.is_idle() {
            if budget == 0 {
                return Err(SimulationError::TickLimit { ticks: max_ticks, now: self.now });
            }

            self.step();
            budget -= 1;
        }

        Ok(self.last_tick)
    }

    /// Whether no process is left, anywhere
    pub fn is_idle(&self) -> bool {
        self.pending.is_empty()
            && self.ready.is_empty()
            && self.running.is_none()
            && self.scheduler.list().is_empty()
    }

    /// The time the next step will run at
    pub fn now(&self) -> Timestamp {
        self.now
    }

    /// Number of steps taken so far
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn running(&self) -> Option<&ProcessBlock> {
        self.running.as_ref()
    }

    pub fn running_pid(&self) -> Option<Pid> {
        self.running.as_ref().map(|pcb| pcb.get_pid())
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Number of processes registered so far
    pub fn registered(&self) -> usize {
        self.registrar.registered()
    }

    /// Gives the notifier back, ending the simulation
    pub fn into_notifier(self) -> N {
        self.notifier
    }
}

impl<N: CompletionNotifier> Simulation<Box<dyn Scheduler>, N> {
    /// Builds the scheduler described by `config` and wraps it in a
    /// simulation using the same tick
    pub fn from_config(config: &SchedulerConfig, notifier: N) -> Result<Self, ConfigError> {
        let scheduler = build(config)?;

        Ok(Simulation::new(scheduler, notifier, config.tick_ms))
    }
}

impl<S: Scheduler, N: CompletionNotifier> Collector for Simulation<S, N> {
    fn collect_running(&self) -> Vec<&dyn Process> {
        let mut procs: Vec<&dyn Process> = Vec::new();

        if let Some(pcb) = &self.running {
            procs.push(pcb);
        }

        procs
    }

    fn collect_ready(&self) -> Vec<&dyn Process> {
        let mut procs: Vec<&dyn Process> = Vec::new();

        for item in self.ready.iter() {
            procs.push(item);
        }

        for item in self.scheduler.list() {
            procs.push(item);
        }

        procs
    }

    fn collect_pending(&self) -> Vec<&dyn Process> {
        let mut procs: Vec<&dyn Process> = Vec::new();

        for item in self.pending.iter() {
            procs.push(&item.1);
        }

        procs
    }
}
