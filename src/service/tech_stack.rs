//! Technology stack inference from collected text signals
//!
//! Pure keyword matching over the company name, website, job postings and
//! headlines. No I/O; the same evidence always yields the same list.

use crate::model::{JobSignal, NewsItem, TechConfidence, TechStackItem};

/// Maximum technologies reported per brief
pub const MAX_TECH_ITEMS: usize = 8;

const SOURCE_JOBS: &str = "job postings";
const SOURCE_NEWS: &str = "news analysis";
const SOURCE_WEBSITE: &str = "website";
const SOURCE_INFERRED: &str = "inferred";

struct TechPattern {
    name: &'static str,
    patterns: &'static [&'static str],
    confidence: TechConfidence,
}

struct IndustryRule {
    name: &'static str,
    keywords: &'static [&'static str],
    source: &'static str,
}

const fn detected(name: &'static str, patterns: &'static [&'static str]) -> TechPattern {
    TechPattern {
        name,
        patterns,
        confidence: TechConfidence::Detected,
    }
}

const fn likely(name: &'static str, patterns: &'static [&'static str]) -> TechPattern {
    TechPattern {
        name,
        patterns,
        confidence: TechConfidence::Likely,
    }
}

/// Declaration order is output order
const TECH_PATTERNS: &[TechPattern] = &[
    // Frontend
    detected("React", &["react", "reactjs", "react.js"]),
    detected("Vue.js", &["vue", "vuejs", "vue.js"]),
    detected("Angular", &["angular", "angularjs"]),
    detected("TypeScript", &["typescript", "ts developer"]),
    likely("JavaScript", &["javascript", "js developer", "frontend"]),
    // Backend
    detected("Node.js", &["node", "nodejs", "node.js", "express"]),
    detected("Python", &["python", "django", "flask", "fastapi"]),
    detected("Java", &["java developer", "spring boot", "java engineer"]),
    detected("Go", &["golang", "go developer", "go engineer"]),
    detected("Ruby", &["ruby", "rails", "ruby on rails"]),
    // Cloud & infrastructure
    detected("AWS", &["aws", "amazon web services", "ec2", "s3"]),
    detected("Google Cloud", &["gcp", "google cloud", "gke"]),
    detected("Azure", &["azure", "microsoft azure"]),
    detected("Docker", &["docker", "container", "kubernetes", "k8s"]),
    detected("Terraform", &["terraform", "infrastructure as code"]),
    // Databases
    detected("PostgreSQL", &["postgres", "postgresql"]),
    detected("MongoDB", &["mongo", "mongodb"]),
    detected("Redis", &["redis", "cache"]),
    detected("MySQL", &["mysql"]),
    // AI/ML
    detected("TensorFlow", &["tensorflow", "tf"]),
    detected("PyTorch", &["pytorch"]),
    likely("Machine Learning", &["ml engineer", "machine learning", "data scientist"]),
    // DevOps
    detected("Jenkins", &["jenkins", "ci/cd"]),
    detected("GitHub Actions", &["github actions", "gh actions"]),
];

const INDUSTRY_RULES: &[IndustryRule] = &[
    IndustryRule {
        name: "Financial APIs",
        keywords: &["fintech", "financial"],
        source: "industry context",
    },
    IndustryRule {
        name: "E-commerce Platform",
        keywords: &["ecommerce", "e-commerce"],
        source: "industry context",
    },
    IndustryRule {
        name: "SaaS Architecture",
        keywords: &["saas", "software as a service"],
        source: "business model",
    },
];

/// Lower-cased text slices the patterns are matched against
struct Corpus {
    website: String,
    jobs: String,
    news: String,
    all: String,
}

impl Corpus {
    fn build(company_name: &str, website: Option<&str>, jobs: &[JobSignal], news: &[NewsItem]) -> Self {
        let company = company_name.to_lowercase();
        let website = website.unwrap_or_default().to_lowercase();
        let jobs = jobs
            .iter()
            .map(|j| format!("{} {}", j.title, j.company))
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase();
        let news = news
            .iter()
            .map(|n| format!("{} {}", n.title, n.description))
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase();
        let all = format!("{} {} {} {}", company, website, jobs, news);

        Self {
            website,
            jobs,
            news,
            all,
        }
    }

    /// Which evidence slice explains a match; company-name-only matches are `inferred`
    fn attribute(&self, pattern: &str) -> &'static str {
        if self.jobs.contains(pattern) {
            SOURCE_JOBS
        } else if self.news.contains(pattern) {
            SOURCE_NEWS
        } else if self.website.contains(pattern) {
            SOURCE_WEBSITE
        } else {
            SOURCE_INFERRED
        }
    }
}

/// Infer the technologies a company likely uses
///
/// Never empty: with no matches the two generic fallback entries are returned.
/// At most [`MAX_TECH_ITEMS`] entries, in table order.
pub fn infer_tech_stack(
    company_name: &str,
    website: Option<&str>,
    jobs: &[JobSignal],
    news: &[NewsItem],
) -> Vec<TechStackItem> {
    let corpus = Corpus::build(company_name, website, jobs, news);
    let mut stack = Vec::new();

    for tech in TECH_PATTERNS {
        let first_match = tech.patterns.iter().find(|p| corpus.all.contains(*p));
        if let Some(pattern) = first_match {
            stack.push(TechStackItem::new(
                tech.name,
                tech.confidence,
                corpus.attribute(pattern),
            ));
        }
    }

    for rule in INDUSTRY_RULES {
        if rule.keywords.iter().any(|k| corpus.all.contains(k)) {
            stack.push(TechStackItem::new(rule.name, TechConfidence::Inferred, rule.source));
        }
    }

    if stack.is_empty() {
        stack.push(TechStackItem::new(
            "Web Technologies",
            TechConfidence::Inferred,
            "default assumption",
        ));
        stack.push(TechStackItem::new(
            "Cloud Infrastructure",
            TechConfidence::Likely,
            "modern business assumption",
        ));
    }

    stack.truncate(MAX_TECH_ITEMS);
    stack
}
