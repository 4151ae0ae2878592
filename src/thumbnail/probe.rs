use super::cdn::Cdn;
use super::session::Presentation;
use super::youtube::{Resolution, ThumbnailUrls, VideoId};
use crate::Error;
use derive_more::Constructor;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Sequence number of one request, plus a view of the newest one issued.
#[derive(Debug, Clone)]
pub(crate) struct Ticket {
    sequence: u64,
    latest: Arc<AtomicU64>,
}

impl Ticket {
    pub(crate) fn sequence(&self) -> u64 {
        self.sequence
    }

    pub(crate) fn is_superseded(&self) -> bool {
        self.latest.load(Ordering::SeqCst) != self.sequence
    }
}

/// The single visible result slot. Only the newest ticket may write to it.
#[derive(Debug, Clone, Default)]
pub(crate) struct Board {
    latest: Arc<AtomicU64>,
    slot: Arc<Mutex<Option<Presentation>>>,
}

impl Board {
    fn slot(&self) -> MutexGuard<'_, Option<Presentation>> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Starts a new request, clearing whatever was shown before.
    pub(crate) fn issue(&self) -> Ticket {
        let mut slot = self.slot();
        *slot = None;
        let sequence = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        Ticket {
            sequence,
            latest: Arc::clone(&self.latest),
        }
    }

    /// Shows `presentation` unless a newer request was issued meanwhile.
    pub(crate) fn present(&self, ticket: &Ticket, presentation: Presentation) -> bool {
        let mut slot = self.slot();
        if ticket.is_superseded() {
            return false;
        }
        *slot = Some(presentation);
        true
    }

    pub(crate) fn current(&self) -> Option<Presentation> {
        self.slot().clone()
    }
}

#[derive(Debug, Constructor)]
pub(crate) struct Request {
    pub(crate) ticket: Ticket,
    pub(crate) video_id: VideoId,
    pub(crate) urls: ThumbnailUrls,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ProbeState {
    Idle,
    Probing,
    Resolved(Resolution),
    Presented(Resolution),
    Exhausted,
    Superseded,
}

/// Walks the candidate resolutions in order until one loads.
#[derive(Debug)]
pub(crate) struct Prober {
    candidates: Vec<Resolution>,
    state: ProbeState,
}

impl Prober {
    pub(crate) fn new(candidates: Vec<Resolution>) -> Self {
        Self {
            candidates,
            state: ProbeState::Idle,
        }
    }

    pub(crate) fn state(&self) -> ProbeState {
        self.state
    }

    pub(crate) fn resolve(&mut self, request: &Request, cdn: &dyn Cdn) -> Result<Resolution, Error> {
        self.state = ProbeState::Probing;
        for &candidate in &self.candidates {
            if request.ticket.is_superseded() {
                self.state = ProbeState::Superseded;
                return Err(Error::Superseded);
            }
            if cdn.probe(request.urls.get(candidate)) {
                self.state = ProbeState::Resolved(candidate);
                return Ok(candidate);
            }
        }
        self.state = ProbeState::Exhausted;
        Err(Error::NoThumbnail)
    }

    pub(crate) fn present(
        &mut self,
        board: &Board,
        ticket: &Ticket,
        presentation: Presentation,
    ) -> Result<(), Error> {
        let resolution = presentation.resolution;
        if board.present(ticket, presentation) {
            self.state = ProbeState::Presented(resolution);
            Ok(())
        } else {
            self.state = ProbeState::Superseded;
            Err(Error::Superseded)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::thumbnail::cdn::fake::FakeCdn;
    use crate::thumbnail::youtube::validate;

    const ID: &str = "dQw4w9WgXcQ";

    fn request(board: &Board) -> Request {
        let video_id = validate(ID).unwrap();
        let urls = ThumbnailUrls::new(&video_id);
        Request::new(board.issue(), video_id, urls)
    }

    fn default_candidates() -> Vec<Resolution> {
        vec![Resolution::MaxRes, Resolution::Hq]
    }

    #[test]
    fn picks_maxres_when_it_loads() {
        let board = Board::default();
        let request = request(&board);
        let cdn = FakeCdn::serving([request.urls.maxres.clone(), request.urls.hq.clone()]);
        let mut prober = Prober::new(default_candidates());
        assert_eq!(prober.state(), ProbeState::Idle);
        assert_eq!(prober.resolve(&request, &cdn), Ok(Resolution::MaxRes));
        assert_eq!(prober.state(), ProbeState::Resolved(Resolution::MaxRes));
        assert_eq!(cdn.probes(), vec![request.urls.maxres.clone()]);
    }

    #[test]
    fn falls_back_to_hq_when_maxres_is_missing() {
        let board = Board::default();
        let request = request(&board);
        let cdn = FakeCdn::serving([request.urls.hq.clone()]);
        let mut prober = Prober::new(default_candidates());
        assert_eq!(prober.resolve(&request, &cdn), Ok(Resolution::Hq));
        assert_eq!(
            cdn.probes(),
            vec![request.urls.maxres.clone(), request.urls.hq.clone()]
        );
    }

    #[test]
    fn reports_when_no_candidate_loads() {
        let board = Board::default();
        let request = request(&board);
        let cdn = FakeCdn::default();
        let mut prober = Prober::new(default_candidates());
        assert_eq!(prober.resolve(&request, &cdn), Err(Error::NoThumbnail));
        assert_eq!(prober.state(), ProbeState::Exhausted);

        let mut prober = Prober::new(Vec::new());
        assert_eq!(prober.resolve(&request, &cdn), Err(Error::NoThumbnail));
    }

    #[test]
    fn custom_candidate_order_is_respected() {
        let board = Board::default();
        let request = request(&board);
        let cdn = FakeCdn::serving([request.urls.sd.clone(), request.urls.mq.clone()]);
        let mut prober = Prober::new(vec![Resolution::MaxRes, Resolution::Sd, Resolution::Mq]);
        assert_eq!(prober.resolve(&request, &cdn), Ok(Resolution::Sd));
    }

    #[test]
    fn superseded_probe_stops_without_loading() {
        let board = Board::default();
        let stale = request(&board);
        let _fresh = request(&board);
        let cdn = FakeCdn::serving([stale.urls.maxres.clone()]);
        let mut prober = Prober::new(default_candidates());
        assert_eq!(prober.resolve(&stale, &cdn), Err(Error::Superseded));
        assert_eq!(prober.state(), ProbeState::Superseded);
        assert!(cdn.probes().is_empty());
    }

    #[test]
    fn tickets_increase_and_only_the_latest_is_current() {
        let board = Board::default();
        let first = board.issue();
        let second = board.issue();
        assert!(second.sequence() > first.sequence());
        assert!(first.is_superseded());
        assert!(!second.is_superseded());
    }
}
