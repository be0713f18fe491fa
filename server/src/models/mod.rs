pub mod content;
pub mod event;

pub use content::{
    AnnualReport, Award, ContactInfo, ContactKind, Faq, Partner, Program, SiteSettings, Stat,
    TeamMember, Testimonial, VolunteerRole,
};
pub use event::{Event, EventRecap, EventStatus, EventType};
