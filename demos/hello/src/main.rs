//! Minimal [`eoos_sys::Program`] implementation: boots the facade, runs a
//! couple of worker threads coordinated through a mutex and a semaphore,
//! and reports back through the console streams.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use eoos_sys::{Configuration, ExitCode, Program, System, Task};

struct Worker {
    id: i64,
    counter: Arc<AtomicI64>,
    mutex: Arc<eoos_sys::Mutex>,
}

impl Task for Worker {
    fn start(&self) -> i32 {
        self.mutex.lock();
        let value = self.counter.fetch_add(1, Ordering::SeqCst) + 1;
        System::get()
            .stream_manager()
            .cout()
            .write_str(&format!("worker {} saw counter={value}\n", self.id));
        // SAFETY: this thread just locked `self.mutex` above and has not
        // unlocked it since.
        unsafe { self.mutex.unlock() };
        0
    }
}

struct Hello;

impl Program for Hello {
    fn start(argc: i32, argv: &[String]) -> i32 {
        System::get()
            .stream_manager()
            .cout()
            .write_str(&format!("hello: argc={argc} argv={argv:?}\n"));
        0
    }
}

fn main() {
    tracing_subscriber::fmt::init();

    let system = match System::new(Configuration::platform_default()) {
        Ok(system) => system,
        Err(err) => {
            eprintln!("failed to construct system: {err}");
            std::process::exit(ExitCode::SystemAbort.code());
        }
    };

    let counter = Arc::new(AtomicI64::new(0));
    let mutex: Arc<eoos_sys::Mutex> = Arc::new(eoos_sys::Mutex::new());

    let threads: Vec<_> = (0..4)
        .map(|id| {
            let task: Arc<dyn Task> = Arc::new(Worker {
                id,
                counter: Arc::clone(&counter),
                mutex: Arc::clone(&mutex),
            });
            system.scheduler().create_thread(task)
        })
        .collect();

    for thread in &threads {
        thread.execute();
    }
    for thread in &threads {
        thread.join();
    }

    let args: Vec<String> = std::env::args().collect();
    let code = System::execute::<Hello>(args.len() as i32, &args);
    std::process::exit(code);
}
