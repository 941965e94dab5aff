//! Prometheus counters for the card service.

use metrics::{counter, histogram};

use crate::rendering::CardSource;

pub fn record_request(route: &'static str) {
    counter!("card_requests_total", "route" => route).increment(1);
}

pub fn record_cache_lookup(hit: bool) {
    if hit {
        counter!("card_cache_hits_total").increment(1);
    } else {
        counter!("card_cache_misses_total").increment(1);
    }
}

pub fn record_outcome(source: CardSource) {
    counter!("card_responses_total", "source" => source.as_str()).increment(1);
}

pub fn record_failure(kind: &'static str) {
    counter!("card_render_failures_total", "kind" => kind).increment(1);
}

pub fn record_render_time(seconds: f64) {
    histogram!("card_render_duration_seconds").record(seconds);
}

pub fn record_cache_write_failure() {
    counter!("card_cache_write_failures_total").increment(1);
}
