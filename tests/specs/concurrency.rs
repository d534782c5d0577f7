//! Concurrency specs
//!
//! Verify simultaneous invocations keep their results apart.

use crate::prelude::*;

#[test]
fn concurrent_async_runs_do_not_mix_output() {
    init_tracing();
    let runtime = tokio::runtime::Builder::new_multi_thread().enable_all().build().unwrap();

    let results = runtime.block_on(async {
        let tasks: Vec<_> = (0..16)
            .map(|i| tokio::spawn(ezspawn::run(params![ECHO_ARGS, [format!("task-{i}")]])))
            .collect();

        let mut results = Vec::new();
        for task in tasks {
            results.push(task.await.unwrap().unwrap());
        }
        results
    });

    for (i, process) in results.iter().enumerate() {
        assert_eq!(process.args, [format!("task-{i}")]);
        assert_eq!(process.stdout, format!("Argument #1: task-{i}\n").as_str());
        assert_eq!(process.output, process.stdout);
    }
}

#[test]
fn concurrent_callbacks_each_fire_once() {
    init_tracing();
    let runtime = tokio::runtime::Builder::new_multi_thread().enable_all().build().unwrap();

    let codes = runtime.block_on(async {
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        for code in 0..8 {
            let tx = tx.clone();
            ezspawn::run_with_callback(format!("{EXIT_CODE} {code} --silent"), move |result| {
                let _ = tx.send(result.map(|p| p.exit_code));
            });
        }
        drop(tx);

        let mut codes = Vec::new();
        while let Some(result) = rx.recv().await {
            codes.push(result.unwrap());
        }
        codes.sort();
        codes
    });

    let expected: Vec<_> = (0..8).map(Some).collect();
    assert_eq!(codes, expected);
}

#[test]
fn sync_runs_from_many_threads() {
    let handles: Vec<_> = (0..8)
        .map(|i| std::thread::spawn(move || ezspawn::sync(params![ECHO_ARGS, format!("t{i}")])))
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        let process = handle.join().unwrap().unwrap();
        assert_eq!(process.stdout, format!("Argument #1: t{i}\n").as_str());
    }
}
