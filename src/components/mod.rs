//! UI components: the star map canvas and the panels around it.

pub mod chat;
pub mod club_card;
pub mod club_search;
pub mod star_map;
