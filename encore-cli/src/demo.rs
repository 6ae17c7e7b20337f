use encore_core::User;

/// The walk-up crowd for the demo run.
pub fn demo_users() -> Vec<User> {
    vec![
        User::new(1, "Jasmine Palma", "jasmine.palma@email.com"),
        User::new(2, "Aldrich Sabando", "aldrich.sabando@email.com"),
        User::new(3, "Nikko Parungao", "nikko.parungao@email.com"),
        User::new(4, "Francoise Gurango", "francoise.gurango@email.com"),
        User::new(5, "Allein Dane Maninang", "allein.maninang@email.com"),
    ]
}
