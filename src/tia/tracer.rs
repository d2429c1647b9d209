use once_cell::sync::Lazy;
use std::collections::VecDeque;
use std::sync::Mutex;

pub mod macros;
pub mod traceable;
pub use traceable::Traceable;

pub const TRACER_CAPACITY: usize = 10_000;

pub static TRACER: Lazy<Mutex<Tracer>> = Lazy::new(|| Mutex::new(Tracer::new(TRACER_CAPACITY)));

/// Global history of debugger events (pokes, captures)
pub struct Tracer {
    history: VecDeque<String>,
    capacity: usize,
}

impl Tracer {
    pub fn new(capacity: usize) -> Self {
        Self {
            history: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn write(&mut self, msg: String) {
        if self.history.len() == self.capacity {
            self.history.pop_front();
        }
        self.history.push_back(msg);
    }

    pub fn print(&self) {
        for (i, line) in self.history.iter().enumerate() {
            println!("{:04}: {}", i, line);
        }
    }

    pub fn log<T: Traceable>(&mut self, thing: &T) {
        if let Some(trace) = thing.trace() {
            self.write(trace);
        }
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.history.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    pub fn clear(&mut self) {
        self.history.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Dummy(u8);

    impl Traceable for Dummy {
        fn trace_name(&self) -> &'static str {
            "DUMMY"
        }
        fn trace_state(&self) -> Option<String> {
            (self.0 != 0).then(|| format!("{}", self.0))
        }
    }

    #[test]
    fn test_tracer_drops_oldest_when_full() {
        let mut tracer = Tracer::new(2);
        tracer.write("a".into());
        tracer.write("b".into());
        tracer.write("c".into());
        assert_eq!(tracer.lines().collect::<Vec<_>>(), vec!["b", "c"]);
    }

    #[test]
    fn test_tracer_logs_traceables() {
        let mut tracer = Tracer::new(4);
        tracer.log(&Dummy(0));
        tracer.log(&Dummy(7));
        assert_eq!(tracer.len(), 1);
        assert_eq!(tracer.lines().next(), Some("DUMMY 7"));
        tracer.clear();
        assert!(tracer.is_empty());
    }
}
