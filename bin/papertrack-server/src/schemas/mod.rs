pub mod past_paper;
