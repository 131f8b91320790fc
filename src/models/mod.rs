pub mod class_enrollment;
pub mod contact;
pub mod gym_class;
pub mod membership;
pub mod trainer;
pub mod user;

pub use class_enrollment::Entity as ClassEnrollment;
pub use contact::{Entity as Contact, Model as ContactModel};
pub use gym_class::{Entity as GymClass, Model as GymClassModel};
pub use membership::{Entity as Membership, Model as MembershipModel};
pub use trainer::{Entity as Trainer, Model as TrainerModel};
pub use user::{Entity as User, Model as UserModel};
