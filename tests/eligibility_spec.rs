use exam_portal::eligibility::*;
use speculate2::speculate;

const FLAGS: [(bool, bool); 4] = [(false, false), (false, true), (true, false), (true, true)];

speculate! {
    describe "availability status" {
        it "follows the spot thresholds across the whole range" {
            for capacity in 0..=40u32 {
                for enrolled in 0..=45u32 {
                    let eval = evaluate_exam(capacity, enrolled, true, false);
                    let spots = i64::from(capacity) - i64::from(enrolled);

                    assert_eq!(eval.available_spots, spots);
                    assert_eq!(eval.status == AvailabilityStatus::Full, spots <= 0);
                    assert_eq!(eval.status == AvailabilityStatus::AlmostFull, (1..=10).contains(&spots));
                    assert_eq!(eval.status == AvailabilityStatus::Open, spots > 10);
                }
            }
        }

        it "resolves overbooked exams to full" {
            let eval = evaluate_exam(20, 25, true, false);
            assert_eq!(eval.available_spots, -5);
            assert_eq!(eval.status, AvailabilityStatus::Full);
            assert!(!eval.can_attempt_register);
        }

        it "treats a zero-capacity exam as full" {
            assert_eq!(evaluate_exam(0, 0, true, false).status, AvailabilityStatus::Full);
        }
    }

    describe "button label" {
        it "shows Registered regardless of fullness or authentication" {
            for (capacity, enrolled) in [(30, 10), (30, 25), (30, 30), (30, 40)] {
                for is_authenticated in [true, false] {
                    let eval = evaluate_exam(capacity, enrolled, is_authenticated, true);
                    assert_eq!(eval.button_label, "Registered");
                    assert_eq!(eval.ui_state, RegistrationUiState::Registered);
                }
            }
        }

        it "prefers Exam Full over the sign-in prompt" {
            assert_eq!(evaluate_exam(30, 30, false, false).button_label, "Exam Full");
        }

        it "prompts signed-out viewers to sign in" {
            assert_eq!(evaluate_exam(30, 25, false, false).button_label, "Sign In to Register");
        }

        it "offers registration to eligible viewers" {
            assert_eq!(evaluate_exam(30, 25, true, false).button_label, "Register Now");
        }
    }

    describe "can_attempt_register" {
        it "requires authentication, free spots and no existing registration" {
            for (capacity, enrolled) in [(30, 0), (30, 25), (30, 30), (10, 12)] {
                for (is_authenticated, is_registered) in FLAGS {
                    let eval = evaluate_exam(capacity, enrolled, is_authenticated, is_registered);
                    let expected = is_authenticated
                        && eval.status != AvailabilityStatus::Full
                        && !is_registered;
                    assert_eq!(eval.can_attempt_register, expected);
                }
            }
        }

        it "agrees with the Open ui state" {
            for (is_authenticated, is_registered) in FLAGS {
                let eval = evaluate_exam(30, 5, is_authenticated, is_registered);
                assert_eq!(eval.can_attempt_register, eval.ui_state == RegistrationUiState::Open);
            }
        }
    }

    describe "scenarios" {
        it "is almost full with five of thirty seats left" {
            let eval = evaluate_exam(30, 25, true, false);
            assert_eq!(eval.available_spots, 5);
            assert_eq!(eval.status, AvailabilityStatus::AlmostFull);
        }

        it "a full exam blocks a signed-in viewer" {
            let eval = evaluate_exam(30, 30, true, false);
            assert_eq!(eval.status, AvailabilityStatus::Full);
            assert!(!eval.can_attempt_register);
            assert_eq!(eval.button_label, "Exam Full");
        }

        it "an open exam still needs sign-in" {
            let eval = evaluate_exam(30, 10, false, false);
            assert_eq!(eval.status, AvailabilityStatus::Open);
            assert!(!eval.can_attempt_register);
            assert_eq!(eval.button_label, "Sign In to Register");
        }

        it "is idempotent" {
            assert_eq!(evaluate_exam(30, 22, true, false), evaluate_exam(30, 22, true, false));
        }
    }
}
