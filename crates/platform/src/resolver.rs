//! Ordered probing with a process-wide cache.

use crate::error::{Error, Result};
use crate::probe::{DebianProbe, LsbSource, Probe, RedHatProbe, SwVersProbe};
use crate::types::PlatformInfo;
use declarative::CommandRunner;
use std::sync::{Arc, PoisonError, RwLock};

/// Identifies the host platform once and caches the result.
///
/// Probes run in order. A probe reporting `NotIdentified` hands over to the
/// next one; any other error aborts resolution. Only successes are cached,
/// so a transient failure is retried on the next call.
pub struct Resolver {
    probes: Vec<Box<dyn Probe>>,
    cache: RwLock<Option<PlatformInfo>>,
}

impl Resolver {
    /// Resolver with an explicit probe list.
    pub fn with_probes(probes: Vec<Box<dyn Probe>>) -> Self {
        Self {
            probes,
            cache: RwLock::new(None),
        }
    }

    /// Resolver with the probes appropriate for the running OS.
    pub fn for_host(runner: Arc<dyn CommandRunner>) -> Self {
        let probes: Vec<Box<dyn Probe>> = match std::env::consts::OS {
            "linux" => {
                let lsb = Arc::new(LsbSource::new("/", Arc::clone(&runner)));
                vec![
                    Box::new(DebianProbe::new("/", lsb)),
                    Box::new(RedHatProbe::new("/")),
                ]
            }
            "macos" => vec![Box::new(SwVersProbe::new(runner))],
            _ => Vec::new(),
        };
        Self::with_probes(probes)
    }

    /// Resolver that always reports `info`.
    pub fn fixed(info: PlatformInfo) -> Self {
        Self {
            probes: Vec::new(),
            cache: RwLock::new(Some(info)),
        }
    }

    /// Identify the host platform.
    ///
    /// # Errors
    ///
    /// `Error::Unidentified` when every probe declines, or the first hard
    /// probe error.
    pub fn identify(&self) -> Result<PlatformInfo> {
        if let Some(info) = self
            .cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
        {
            return Ok(info.clone());
        }

        let mut guard = self.cache.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(info) = guard.as_ref() {
            return Ok(info.clone());
        }
        let info = self.probe()?;
        *guard = Some(info.clone());
        Ok(info)
    }

    fn probe(&self) -> Result<PlatformInfo> {
        for probe in &self.probes {
            match probe.identify() {
                Ok(info) => {
                    log::debug!(
                        "platform identified by {}: {} ({}) {}",
                        probe.name(),
                        info.platform,
                        info.family,
                        info.version
                    );
                    return Ok(info);
                }
                Err(e) if e.is_not_identified() => {
                    log::trace!("probe {} did not match", probe.name());
                }
                Err(e) => return Err(e),
            }
        }
        Err(Error::Unidentified)
    }
}

impl std::fmt::Debug for Resolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<_> = self.probes.iter().map(|p| p.name()).collect();
        f.debug_struct("Resolver").field("probes", &names).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Family, Name};
    use std::sync::atomic::{AtomicUsize, Ordering};

    enum Answer {
        Decline,
        Fail,
        Match(Name, Family),
    }

    struct ScriptedProbe {
        answer: Answer,
        calls: Arc<AtomicUsize>,
    }

    impl Probe for ScriptedProbe {
        fn name(&self) -> &'static str {
            "scripted"
        }

        fn identify(&self) -> Result<PlatformInfo> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.answer {
                Answer::Decline => Err(Error::NotIdentified),
                Answer::Fail => Err(Error::Command("boom".into())),
                Answer::Match(name, family) => Ok(PlatformInfo::new(name, family, "1.0")),
            }
        }
    }

    fn probe(answer: Answer) -> (Box<dyn Probe>, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let probe = ScriptedProbe {
            answer,
            calls: Arc::clone(&calls),
        };
        (Box::new(probe), calls)
    }

    #[test]
    fn test_falls_through_not_identified() {
        let (first, _) = probe(Answer::Decline);
        let (second, _) = probe(Answer::Match(Name::CentOs, Family::Rhel));
        let resolver = Resolver::with_probes(vec![first, second]);

        let info = resolver.identify().unwrap();
        assert_eq!(info.platform, Name::CentOs);
    }

    #[test]
    fn test_hard_error_stops_resolution() {
        let (first, _) = probe(Answer::Fail);
        let (second, second_calls) = probe(Answer::Match(Name::CentOs, Family::Rhel));
        let resolver = Resolver::with_probes(vec![first, second]);

        assert!(matches!(resolver.identify(), Err(Error::Command(_))));
        assert_eq!(second_calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_no_match_is_unidentified() {
        let (only, _) = probe(Answer::Decline);
        let resolver = Resolver::with_probes(vec![only]);
        assert!(matches!(resolver.identify(), Err(Error::Unidentified)));
        assert!(matches!(
            Resolver::with_probes(Vec::new()).identify(),
            Err(Error::Unidentified)
        ));
    }

    #[test]
    fn test_success_is_cached() {
        let (only, calls) = probe(Answer::Match(Name::Debian, Family::Debian));
        let resolver = Resolver::with_probes(vec![only]);

        resolver.identify().unwrap();
        resolver.identify().unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_failure_is_not_cached() {
        let (only, calls) = probe(Answer::Fail);
        let resolver = Resolver::with_probes(vec![only]);

        assert!(resolver.identify().is_err());
        assert!(resolver.identify().is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_concurrent_first_calls_probe_once() {
        let (only, calls) = probe(Answer::Match(Name::Ubuntu, Family::Debian));
        let resolver = Resolver::with_probes(vec![only]);

        std::thread::scope(|s| {
            for _ in 0..8 {
                s.spawn(|| resolver.identify().unwrap());
            }
        });
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_poisoned_cache_still_serves_identification() {
        let (only, calls) = probe(Answer::Match(Name::Debian, Family::Debian));
        let resolver = Resolver::with_probes(vec![only]);
        resolver.identify().unwrap();

        std::thread::scope(|s| {
            let poisoner = s.spawn(|| {
                let _guard = resolver.cache.write().unwrap();
                panic!("poison the cache");
            });
            assert!(poisoner.join().is_err());
        });
        assert!(resolver.cache.is_poisoned());

        assert_eq!(resolver.identify().unwrap().platform, Name::Debian);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_fixed_resolver() {
        let info = PlatformInfo::new(Name::MacOsX, Family::MacOsX, "14.5");
        assert_eq!(Resolver::fixed(info.clone()).identify().unwrap(), info);
    }
}
