pub mod funnel_log_side_effect;
pub mod min_score_filter;
pub mod pool_source;
pub mod rubric_scorer;
pub mod shortlist_selector;
