pub mod buyer_match;
