//! Scripted in-memory resolver shared by the integration tests.

#![allow(dead_code)]

use email_vet_core::{AppError, Config, ConfigBuilder, DnsAnswer, DnsResolve, DnsResponse, RecordType, ReferenceData, Result, Validator};
use futures::future::{BoxFuture, FutureExt};
use parking_lot::Mutex;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Clone)]
pub enum Scripted {
    Answer(DnsResponse),
    Fail,
    Panic,
    Delayed(Duration, Box<Scripted>),
}

pub fn response(status: u32, answers: &[(RecordType, &str)]) -> DnsResponse {
    DnsResponse {
        status,
        answers: answers
            .iter()
            .map(|(rt, data)| DnsAnswer {
                name: String::new(),
                record_type: rt.code(),
                ttl: 300,
                data: data.to_string(),
            })
            .collect(),
    }
}

pub fn nxdomain() -> DnsResponse {
    response(3, &[])
}

/// Answers queries from a script. Unscripted names are NXDOMAIN. When a
/// name has several scripted answers they are played in order and the last
/// one repeats.
#[derive(Default)]
pub struct FakeResolver {
    script: Mutex<HashMap<(String, RecordType), VecDeque<Scripted>>>,
    calls: Mutex<Vec<(String, RecordType)>>,
}

impl FakeResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(self, name: &str, record_type: RecordType, scripted: Scripted) -> Self {
        self.script
            .lock()
            .entry((name.to_string(), record_type))
            .or_default()
            .push_back(scripted);
        self
    }

    pub fn with_mx(self, domain: &str, exchanges: &[&str]) -> Self {
        let answers: Vec<(RecordType, &str)> = exchanges.iter().map(|e| (RecordType::Mx, *e)).collect();
        self.on(domain, RecordType::Mx, Scripted::Answer(response(0, &answers)))
    }

    pub fn calls_for(&self, name: &str, record_type: RecordType) -> usize {
        self.calls
            .lock()
            .iter()
            .filter(|(n, rt)| n == name && *rt == record_type)
            .count()
    }

    pub fn total_calls(&self) -> usize {
        self.calls.lock().len()
    }

    fn next(&self, name: &str, record_type: RecordType) -> Option<Scripted> {
        let mut script = self.script.lock();
        let queue = script.get_mut(&(name.to_string(), record_type))?;
        if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().cloned()
        }
    }
}

impl DnsResolve for FakeResolver {
    fn resolve<'a>(&'a self, name: &'a str, record_type: RecordType) -> BoxFuture<'a, Result<DnsResponse>> {
        self.calls.lock().push((name.to_string(), record_type));
        let mut current = self.next(name, record_type);
        async move {
            loop {
                match current {
                    None => return Ok(nxdomain()),
                    Some(Scripted::Answer(r)) => return Ok(r),
                    Some(Scripted::Fail) => return Err(AppError::DnsHttpStatus(503)),
                    Some(Scripted::Panic) => panic!("scripted resolver panic for {}", name),
                    Some(Scripted::Delayed(delay, inner)) => {
                        tokio::time::sleep(delay).await;
                        current = Some(*inner);
                    }
                }
            }
        }
        .boxed()
    }
}

pub fn validator_with(config: Config, resolver: Arc<FakeResolver>) -> Validator {
    Validator::with_resolver(config, resolver, ReferenceData::builtin())
}

pub fn default_validator(resolver: Arc<FakeResolver>) -> Validator {
    validator_with(ConfigBuilder::new().build().unwrap(), resolver)
}
