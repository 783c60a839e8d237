//! Routing matrix tests through the public service API with mocked backends

use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;
use std::sync::Arc;

use async_trait::async_trait;
use faqrouter::errors::FaqRouterError;
use faqrouter::llm::ChatCompletion;
use faqrouter::llm::ChatMessage;
use faqrouter::llm::CompletionParams;
use faqrouter::prompts::OUT_OF_SCOPE_REPLY;
use faqrouter::retrieval::RetrievalResult;
use faqrouter::retrieval::SimilaritySearch;
use faqrouter::FaqService;
use faqrouter::RoutePath;
use faqrouter::Thresholds;
use faqrouter::Result;

const ERROR_SCORE: f64 = -1.0;

/// Search mock returning a fixed result (or a transport error)
struct MockSearch {
    doc: String,
    score: f64,
    fail: bool,
    calls: AtomicUsize,
}

impl MockSearch {
    fn hit(doc: &str, score: f64) -> Self {
        Self {
            doc: doc.to_string(),
            score,
            fail: false,
            calls: AtomicUsize::new(0),
        }
    }

    fn failing() -> Self {
        Self {
            doc: String::new(),
            score: 0.0,
            fail: true,
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl SimilaritySearch for MockSearch {
    async fn search(&self, _query: &str) -> Result<RetrievalResult> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(FaqRouterError::Http("connection reset".to_string()));
        }
        Ok(RetrievalResult {
            doc: self.doc.clone(),
            score: self.score,
        })
    }
}

/// Completion mock with separate canned outputs for verdict and generative
/// calls, told apart by their token budgets
struct MockLlm {
    verdict_reply: String,
    generated_reply: String,
    judge_calls: AtomicUsize,
    generate_calls: AtomicUsize,
}

impl MockLlm {
    fn new(verdict_reply: &str, generated_reply: &str) -> Self {
        Self {
            verdict_reply: verdict_reply.to_string(),
            generated_reply: generated_reply.to_string(),
            judge_calls: AtomicUsize::new(0),
            generate_calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl ChatCompletion for MockLlm {
    async fn complete(
        &self,
        _messages: &[ChatMessage],
        params: &CompletionParams,
    ) -> Result<String> {
        if params.max_tokens == CompletionParams::verdict().max_tokens {
            self.judge_calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.verdict_reply.clone())
        } else {
            self.generate_calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.generated_reply.clone())
        }
    }
}

fn service(search: Arc<MockSearch>, llm: Arc<MockLlm>) -> FaqService {
    FaqService::from_services(search, llm, Thresholds::default(), ERROR_SCORE)
}

#[tokio::test]
async fn high_score_returns_document_without_judging() {
    let search = Arc::new(MockSearch::hit("To add daily consumable food: ...", 0.75));
    let llm = Arc::new(MockLlm::new("TRUE", "generated"));
    let svc = service(Arc::clone(&search), Arc::clone(&llm));

    let response = svc.respond("How do I add food daily?").await.unwrap();
    assert_eq!(response.answer, "To add daily consumable food: ...");
    assert_eq!(response.path, RoutePath::Direct);
    assert_eq!(llm.judge_calls.load(Ordering::SeqCst), 0);
    assert_eq!(llm.generate_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn low_score_generates_without_judging() {
    let search = Arc::new(MockSearch::hit("", 0.05));
    let llm = Arc::new(MockLlm::new("TRUE", OUT_OF_SCOPE_REPLY));
    let svc = service(search, Arc::clone(&llm));

    let response = svc.respond("what time is it?").await.unwrap();
    assert_eq!(response.answer, OUT_OF_SCOPE_REPLY);
    assert_eq!(response.path, RoutePath::Fallback);
    assert_eq!(llm.judge_calls.load(Ordering::SeqCst), 0);
    assert_eq!(llm.generate_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn gray_zone_true_verdict_returns_document() {
    let search = Arc::new(MockSearch::hit("To logout: click the logout button", 0.45));
    let llm = Arc::new(MockLlm::new("TRUE", "generated"));
    let svc = service(search, Arc::clone(&llm));

    let response = svc.respond("how do i log out").await.unwrap();
    assert_eq!(response.answer, "To logout: click the logout button");
    assert_eq!(response.path, RoutePath::JudgedDirect);
    assert_eq!(llm.judge_calls.load(Ordering::SeqCst), 1);
    assert_eq!(llm.generate_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn gray_zone_false_verdict_generates() {
    let search = Arc::new(MockSearch::hit("To logout: click the logout button", 0.45));
    let llm = Arc::new(MockLlm::new("FALSE", "a freshly generated answer"));
    let svc = service(search, Arc::clone(&llm));

    let response = svc.respond("how do i sort my foods").await.unwrap();
    assert_eq!(response.answer, "a freshly generated answer");
    assert_eq!(response.path, RoutePath::JudgedFallback);
    assert_eq!(llm.judge_calls.load(Ordering::SeqCst), 1);
    assert_eq!(llm.generate_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn gray_zone_garbage_verdict_is_treated_as_false() {
    let search = Arc::new(MockSearch::hit("some doc", 0.5));
    let llm = Arc::new(MockLlm::new("I am not sure about that", "generated"));
    let svc = service(search, Arc::clone(&llm));

    let response = svc.respond("anything").await.unwrap();
    assert_eq!(response.answer, "generated");
    assert_eq!(response.path, RoutePath::JudgedFallback);
    assert_eq!(llm.judge_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn score_exactly_at_high_threshold_goes_to_the_judge() {
    let search = Arc::new(MockSearch::hit("boundary doc", 0.6));
    let llm = Arc::new(MockLlm::new("TRUE", "generated"));
    let svc = service(search, Arc::clone(&llm));

    let response = svc.respond("boundary").await.unwrap();
    // 0.6 is not above the high threshold, so the judge must run
    assert_eq!(response.path, RoutePath::JudgedDirect);
    assert_eq!(llm.judge_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn score_exactly_at_low_threshold_enters_gray_zone() {
    let search = Arc::new(MockSearch::hit("boundary doc", 0.3));
    let llm = Arc::new(MockLlm::new("FALSE", "generated"));
    let svc = service(search, Arc::clone(&llm));

    let response = svc.respond("boundary").await.unwrap();
    assert_eq!(response.path, RoutePath::JudgedFallback);
    assert_eq!(llm.judge_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn search_failure_routes_to_generation() {
    let search = Arc::new(MockSearch::failing());
    let llm = Arc::new(MockLlm::new("TRUE", "generated after failure"));
    let svc = service(Arc::clone(&search), Arc::clone(&llm));

    let response = svc.respond("any question").await.unwrap();
    assert_eq!(search.calls.load(Ordering::SeqCst), 1);
    assert_eq!(response.answer, "generated after failure");
    assert_eq!(response.path, RoutePath::Fallback);
    assert_eq!(llm.judge_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn judge_failure_propagates_to_caller() {
    struct BrokenLlm;

    #[async_trait]
    impl ChatCompletion for BrokenLlm {
        async fn complete(
            &self,
            _messages: &[ChatMessage],
            _params: &CompletionParams,
        ) -> Result<String> {
            Err(FaqRouterError::Llm("upstream 500".to_string()))
        }
    }

    let search = Arc::new(MockSearch::hit("doc", 0.45));
    let svc = FaqService::from_services(
        search,
        Arc::new(BrokenLlm),
        Thresholds::default(),
        ERROR_SCORE,
    );

    assert!(svc.get_response("anything").await.is_err());
}

#[tokio::test]
async fn repeated_queries_are_idempotent() {
    let search = Arc::new(MockSearch::hit("stable doc", 0.45));
    let llm = Arc::new(MockLlm::new("TRUE", "generated"));
    let svc = service(search, Arc::clone(&llm));

    let first = svc.respond("same question").await.unwrap();
    let second = svc.respond("same question").await.unwrap();
    assert_eq!(first.answer, second.answer);
    assert_eq!(first.path, second.path);
    // one judge call per request, nothing cached or skipped
    assert_eq!(llm.judge_calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn get_response_returns_the_answer_string() {
    let search = Arc::new(MockSearch::hit("To check your analytics: ...", 0.9));
    let llm = Arc::new(MockLlm::new("TRUE", "generated"));
    let svc = service(search, llm);

    let answer = svc.get_response("where are my analytics").await.unwrap();
    assert_eq!(answer, "To check your analytics: ...");
}

#[tokio::test]
async fn custom_thresholds_shift_the_gray_zone() {
    let search = Arc::new(MockSearch::hit("doc", 0.75));
    let llm = Arc::new(MockLlm::new("TRUE", "generated"));
    let svc = FaqService::from_services(
        Arc::clone(&search) as Arc<dyn SimilaritySearch>,
        Arc::clone(&llm) as Arc<dyn ChatCompletion>,
        Thresholds { high: 0.8, low: 0.5 },
        ERROR_SCORE,
    );

    let response = svc.respond("anything").await.unwrap();
    // 0.75 sits in the widened gray zone now
    assert_eq!(response.path, RoutePath::JudgedDirect);
    assert_eq!(llm.judge_calls.load(Ordering::SeqCst), 1);
}
