//! Pipeline counters, following standard Prometheus naming conventions.
//! Recording is a no-op unless the embedding process installs a recorder.

/// Metric names used by the pipeline. An enum rather than magic strings so
/// renames are caught at compile time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricName {
    ServiceCalls,
    ServiceNoOps,
    IntentsEmitted,
    CalculatorErrors,
    RegistryLoadsSuccess,
    RegistryLoadsError,
}

impl MetricName {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricName::ServiceCalls => "fin_service_calls_total",
            MetricName::ServiceNoOps => "fin_service_noops_total",
            MetricName::IntentsEmitted => "fin_intents_emitted_total",
            MetricName::CalculatorErrors => "fin_calculator_errors_total",
            MetricName::RegistryLoadsSuccess => "fin_registry_loads_success_total",
            MetricName::RegistryLoadsError => "fin_registry_loads_error_total",
        }
    }
}

pub mod pipeline {
    use super::MetricName;

    pub fn service_call(capability: &str) {
        ::metrics::counter!(MetricName::ServiceCalls.as_str(), "capability" => capability.to_string())
            .increment(1);
    }

    pub fn service_noop(capability: &str) {
        ::metrics::counter!(MetricName::ServiceNoOps.as_str(), "capability" => capability.to_string())
            .increment(1);
    }

    pub fn intents_emitted(capability: &str, count: u64) {
        ::metrics::counter!(MetricName::IntentsEmitted.as_str(), "capability" => capability.to_string())
            .increment(count);
    }

    pub fn calculator_error(capability: &str) {
        ::metrics::counter!(MetricName::CalculatorErrors.as_str(), "capability" => capability.to_string())
            .increment(1);
    }
}

pub mod registry {
    use super::MetricName;

    pub fn load_success() {
        ::metrics::counter!(MetricName::RegistryLoadsSuccess.as_str()).increment(1);
    }

    pub fn load_error() {
        ::metrics::counter!(MetricName::RegistryLoadsError.as_str()).increment(1);
    }
}
