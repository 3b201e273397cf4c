use crate::scheduler::Process;

pub trait Collector {
    // Returns the process holding the CPU, if any
    fn collect_running(&self) -> Vec<&dyn Process>;

    // Returns the processes waiting in any ready queue
    fn collect_ready(&self) -> Vec<&dyn Process>;

    // Returns the processes registered but not arrived yet
    fn collect_pending(&self) -> Vec<&dyn Process>;
}

pub fn collect_all(scheduler: &dyn Collector) -> Vec<&dyn Process> {
    let mut procs: Vec<&dyn Process> = Vec::new();

    for item in scheduler.collect_running() {
        procs.push(item);
    }

    for item in scheduler.collect_ready() {
        procs.push(item);
    }

    for item in scheduler.collect_pending() {
        procs.push(item);
    }

    procs
}
