//! Load testing for the front door and ingest worker together.

use std::time::{Duration, Instant};

use message_relay::ingest::IngestWorker;
use message_relay::lifecycle::Shutdown;
use message_relay::storage::Store;
use tempfile::TempDir;

mod common;

#[tokio::test]
async fn test_concurrent_submissions() {
    // 1. Worker and store
    let dir = TempDir::new().unwrap();
    let config = common::test_config(dir.path());
    let shutdown = Shutdown::new();

    let store = Store::new(&config.storage.path);
    store.initialize().await.unwrap();
    let worker = IngestWorker::bind(&config.channel, store.clone()).await.unwrap();
    let worker_addr = worker.local_addr().unwrap();
    tokio::spawn(worker.run(shutdown.subscribe()));

    // 2. Front door
    let http_addr = common::start_front_door(config, worker_addr, &shutdown).await;

    // 3. Run load
    let concurrency = 10;
    let requests_per_task = 20;
    let total_requests = concurrency * requests_per_task;

    let client = common::client();
    let start = Instant::now();

    let mut tasks = Vec::new();
    for task_id in 0..concurrency {
        let client = client.clone();
        let url = format!("http://{}/message", http_addr);
        tasks.push(tokio::spawn(async move {
            let mut latencies = Vec::new();
            for i in 0..requests_per_task {
                let req_start = Instant::now();
                let username = format!("user{task_id}");
                let message = format!("message {i}");
                if let Ok(res) = client
                    .post(&url)
                    .form(&[("username", username), ("message", message)])
                    .send()
                    .await
                {
                    if res.status().is_success() {
                        latencies.push(req_start.elapsed());
                    }
                }
            }
            latencies
        }));
    }

    let mut all_latencies = Vec::new();
    for task in tasks {
        all_latencies.extend(task.await.unwrap());
    }
    let duration = start.elapsed();

    // Every valid submission is acknowledged, whatever happens downstream.
    assert_eq!(all_latencies.len(), total_requests);

    // Give the worker a moment to drain; the channel may drop datagrams.
    tokio::time::sleep(Duration::from_millis(500)).await;
    let stored = store.load().await.unwrap().len();
    assert!(stored > 0 && stored <= total_requests, "stored {stored} of {total_requests}");

    all_latencies.sort();
    let p50 = all_latencies[all_latencies.len() / 2];
    let p95 = all_latencies[(all_latencies.len() as f64 * 0.95) as usize];

    println!("\n--- Load Test Results ---");
    println!("Total Requests: {}", total_requests);
    println!("Concurrency:    {}", concurrency);
    println!("Total Duration: {:?}", duration);
    println!("Requests/sec:   {:.2}", total_requests as f64 / duration.as_secs_f64());
    println!("P50 Latency:    {:?}", p50);
    println!("P95 Latency:    {:?}", p95);
    println!("Stored:         {}/{}", stored, total_requests);
    println!("-------------------------\n");

    shutdown.trigger();
}
