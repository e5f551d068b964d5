// Unit tests for STEP Algo

use step_algo::core::booking::{BackOutcome, BookingError, BookingStep, BookingWorkflow};
use step_algo::core::filters::{
    matches_category, matches_city, matches_query, mentor_matches, ALL,
};
use step_algo::core::pricing::price;
use step_algo::core::registration::{
    AdvanceOutcome, ProfileUpdate, RegistrationError, RegistrationWorkflow,
};
use step_algo::core::MentorCatalog;
use step_algo::models::{MeetingFormat, Mentor, UserRole};

fn create_mentor(id: &str, industry: &str, city: &str) -> Mentor {
    Mentor {
        id: id.to_string(),
        name: format!("Наставник {}", id),
        industry: industry.to_string(),
        city: city.to_string(),
        experience: "10 лет".to_string(),
        description: format!("Эксперт в сфере {}", industry),
        achievements: vec![],
        request: String::new(),
        values: vec![],
        video_url: String::new(),
        avatar_url: String::new(),
        single_price: 3000,
        group_price: 1000,
    }
}

#[test]
fn test_filter_is_conjunctive() {
    // each mentor satisfies exactly one of the three predicates for the
    // filter (category="IT", city="Москва", q="продукт")
    let only_category = {
        let mut m = create_mentor("cat", "IT", "Казань");
        m.description = "Эксперт".to_string();
        m
    };
    let only_city = {
        let mut m = create_mentor("city", "Финансы", "Москва");
        m.description = "Эксперт".to_string();
        m
    };
    let only_query = {
        let mut m = create_mentor("q", "Финансы", "Казань");
        m.description = "Строю продуктовые команды".to_string();
        m
    };

    for mentor in [&only_category, &only_city, &only_query] {
        assert!(
            !mentor_matches(mentor, "IT", "Москва", "продукт"),
            "mentor {} satisfies only one predicate and must be excluded",
            mentor.id
        );
    }

    // and a mentor satisfying all three is included
    let mut all_three = create_mentor("all", "IT", "Москва");
    all_three.description = "Строю продуктовые команды".to_string();
    assert!(mentor_matches(&all_three, "IT", "Москва", "продукт"));
}

#[test]
fn test_each_predicate_independently() {
    let mentor = create_mentor("m", "IT / Образование", "Москва");

    assert!(matches_category(&mentor, ALL));
    assert!(matches_category(&mentor, "Образование"));
    assert!(!matches_category(&mentor, "Финансы"));

    assert!(matches_city(&mentor, ALL));
    assert!(matches_city(&mentor, "Москва"));
    assert!(!matches_city(&mentor, "Казань"));

    assert!(matches_query(&mentor, ""));
    assert!(matches_query(&mentor, "наставник"));
    assert!(!matches_query(&mentor, "блокчейн"));
}

#[test]
fn test_filter_order_preserving_and_idempotent() {
    let catalog = MentorCatalog::new(vec![
        create_mentor("1", "IT", "Москва"),
        create_mentor("2", "Маркетинг", "Москва"),
        create_mentor("3", "IT", "Казань"),
        create_mentor("4", "IT", "Москва"),
    ])
    .unwrap();

    let once: Vec<&str> = catalog
        .filter("IT", ALL, "")
        .iter()
        .map(|m| m.id.as_str())
        .collect();
    assert_eq!(once, vec!["1", "3", "4"]);

    // re-applying the same predicates changes nothing
    let twice: Vec<&str> = catalog
        .filter("IT", ALL, "")
        .into_iter()
        .filter(|m| mentor_matches(m, "IT", ALL, ""))
        .map(|m| m.id.as_str())
        .collect();
    assert_eq!(once, twice);
}

#[test]
fn test_pricing_total_and_exact() {
    let mentor = create_mentor("m", "IT", "Москва");

    assert_eq!(price(MeetingFormat::GroupOffline, &mentor), 1000);
    assert_eq!(price(MeetingFormat::Online1On1, &mentor), 3000);
    assert_eq!(price(MeetingFormat::Offline1On1, &mentor), 3000);

    for format in MeetingFormat::ordered() {
        assert!(price(format, &mentor) > 0);
    }
}

#[test]
fn test_booking_forward_transitions_gated() {
    let mut flow = BookingWorkflow::open(create_mentor("m", "IT", "Москва"));

    // slot selection before format selection cannot complete anything
    assert!(matches!(
        flow.select_slot("10:00"),
        Err(BookingError::StepMismatch { .. })
    ));
    assert!(matches!(
        flow.submit_goal("цель", "обмен"),
        Err(BookingError::StepMismatch { .. })
    ));
    assert_eq!(flow.step(), BookingStep::ChoosingFormat);
}

#[test]
fn test_booking_back_preserves_values() {
    let mut flow = BookingWorkflow::open(create_mentor("m", "IT", "Москва"));
    flow.select_format(MeetingFormat::Online1On1).unwrap();
    flow.submit_goal("Выйти на новый рынок", "Интро в сообщество")
        .unwrap();

    assert_eq!(
        flow.back().unwrap(),
        BackOutcome::MovedTo(BookingStep::SettingGoal)
    );
    let view = flow.view();
    assert_eq!(view.goal, "Выйти на новый рынок");
    assert_eq!(view.exchange_offer, "Интро в сообщество");
}

#[test]
fn test_booking_price_comes_from_calculator() {
    let mut flow = BookingWorkflow::open(create_mentor("m", "IT", "Москва"));
    flow.select_format(MeetingFormat::GroupOffline).unwrap();
    flow.submit_goal("цель", "обмен").unwrap();
    let request = flow.select_slot("16:00").unwrap();

    assert_eq!(request.price, 1000);
}

#[test]
fn test_registration_duplicate_slot_rejected() {
    let mut reg = entrepreneur_at_schedule();

    assert!(reg.add_slot("2024-05-01", "10:00").unwrap());
    assert!(!reg.add_slot("2024-05-01", "10:00").unwrap());

    let slots = reg.view().entrepreneur.unwrap().slots;
    assert_eq!(slots, vec!["2024-05-01 в 10:00".to_string()]);
}

#[test]
fn test_registration_hours_clamped() {
    let mut reg = RegistrationWorkflow::new();
    reg.choose_role(UserRole::Entrepreneur).unwrap();

    for (input, expected) in [(0u8, 1u8), (1, 1), (25, 25), (40, 40), (41, 40), (255, 40)] {
        reg.apply_fields(ProfileUpdate {
            hours_per_month: Some(input),
            ..ProfileUpdate::default()
        })
        .unwrap();
        assert_eq!(
            reg.view().entrepreneur.unwrap().hours_per_month,
            expected,
            "hours {} must clamp to {}",
            input,
            expected
        );
    }
}

#[test]
fn test_registration_step_gating() {
    let mut reg = RegistrationWorkflow::new();
    reg.choose_role(UserRole::Youth).unwrap();

    // missing identity fields block the first advance
    assert!(matches!(
        reg.advance(),
        Err(RegistrationError::MissingField(_))
    ));

    reg.apply_fields(ProfileUpdate {
        name: Some("Никита".to_string()),
        birth_date: Some("2004-03-12".to_string()),
        city: Some("Москва".to_string()),
        phone: Some("+7 900 000-00-00".to_string()),
        email: Some("nikita@example.com".to_string()),
        ..ProfileUpdate::default()
    })
    .unwrap();
    assert!(matches!(reg.advance(), Ok(AdvanceOutcome::Moved)));
}

fn entrepreneur_at_schedule() -> RegistrationWorkflow {
    let mut reg = RegistrationWorkflow::new();
    reg.choose_role(UserRole::Entrepreneur).unwrap();
    reg.apply_fields(ProfileUpdate {
        name: Some("Игорь".to_string()),
        business_name: Some("Volkov Tech".to_string()),
        revenue: Some("120 млн ₽".to_string()),
        city: Some("Москва".to_string()),
        industry: Some("IT".to_string()),
        ..ProfileUpdate::default()
    })
    .unwrap();
    reg.advance().unwrap();
    reg.apply_fields(ProfileUpdate {
        values: Some("труд".to_string()),
        request: Some("запрос".to_string()),
        ..ProfileUpdate::default()
    })
    .unwrap();
    reg.advance().unwrap();
    reg.apply_fields(ProfileUpdate {
        video_declared: Some(true),
        ..ProfileUpdate::default()
    })
    .unwrap();
    reg.advance().unwrap();
    reg
}
