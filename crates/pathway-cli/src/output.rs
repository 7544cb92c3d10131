use pathway_common::{HealthStatus, ProcessResult, QueryResult};
use serde::Serialize;

pub fn print_health(health: &HealthStatus) {
    println!("status:  {}", health.status);
    println!("service: {}", health.service);
    println!("mode:    {}", health.mode);
    if let Some(message) = &health.message {
        println!("message: {message}");
    }
}

pub fn print_process(result: &ProcessResult) {
    println!("processed: {}", result.processed);
    print_json(result);
}

pub fn print_query(result: &QueryResult) {
    println!("{}", result.response);
    if !result.context.is_empty() {
        print_json(&result.context);
    }
}

fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{s}"),
        Err(e) => eprintln!("✗ Failed to render result: {e}"),
    }
}
