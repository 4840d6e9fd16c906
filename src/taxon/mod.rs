pub mod grouping;
pub mod parser;

pub use grouping::{alphabetical_index, filter_groups, group_botanical_names};
pub use parser::{BotanicalNameParts, filter_matching, parse_botanical_name};
