pub mod article;
pub mod edge_record;
pub mod scenario;
pub mod topic;

pub use article::{Article, ArticleKind};
pub use edge_record::EdgeRecord;
pub use scenario::{Outlook, TimelineEvent, WhatIfReport};
pub use topic::TopicOverview;
