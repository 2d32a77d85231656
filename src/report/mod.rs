mod tables;

pub use tables::{
    render_closure, render_dashboard, render_matches, render_roster, render_standings,
    standings_json,
};
