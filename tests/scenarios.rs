//! End to end runs of the fleet on a simulated clock: one effective tick per
//! second of simulated time.

use std::time::Duration;

use lift_simulator::utilities::car::CarEvent;
use lift_simulator::utilities::direction::Direction;
use lift_simulator::utilities::error::Error;
use lift_simulator::utilities::fleet::Fleet;

const SECOND: Duration = Duration::from_secs(1);

struct Clock {
    now: u32,
}

impl Clock {
    fn new() -> Self {
        Clock { now: 0 }
    }

    fn now(&self) -> Duration {
        SECOND * self.now
    }

    fn tick(&mut self, fleet: &mut Fleet) -> Vec<CarEvent> {
        self.now += 1;
        fleet.tick_all(self.now())
    }
}

#[test]
fn single_car_carries_a_party_of_two() {
    let mut fleet = Fleet::new(10, 1, SECOND).unwrap();
    let mut clock = Clock::new();

    let assignment = fleet.submit_request(3, 7, 2, clock.now()).unwrap();
    assert_eq!(assignment.car_id, 0);

    let mut visited = Vec::new();
    let mut max_load = 0;
    for _ in 0..20 {
        for event in clock.tick(&mut fleet) {
            match event {
                CarEvent::PassengerPickedUp { floor, .. } => visited.push(("pickup", floor)),
                CarEvent::PassengerDropped { floor, .. } => visited.push(("drop", floor)),
            }
        }
        max_load = max_load.max(fleet.cars()[0].load());
        if fleet.is_idle() {
            break;
        }
    }

    assert_eq!(visited, vec![("pickup", 3), ("drop", 7), ("drop", 7)]);
    assert_eq!(max_load, 2);
    let car = &fleet.cars()[0];
    assert_eq!((car.floor(), car.load(), car.direction()), (7, 0, Direction::Idle));
}

#[test]
fn moving_car_preferred_over_distant_idle_car() {
    let mut fleet = Fleet::new(10, 2, SECOND).unwrap();
    let mut clock = Clock::new();

    // car 0 takes a rider up the whole shaft
    assert_eq!(fleet.submit_request(0, 9, 1, clock.now()).unwrap().car_id, 0);
    for _ in 0..5 {
        clock.tick(&mut fleet);
    }
    let moving = &fleet.cars()[0];
    assert_eq!((moving.floor(), moving.direction()), (5, Direction::Up));
    let idle = &fleet.cars()[1];
    assert_eq!((idle.floor(), idle.direction()), (0, Direction::Idle));

    let assignment = fleet.submit_request(6, 8, 1, clock.now()).unwrap();
    assert_eq!(assignment.car_id, 0);
    assert!(fleet.cars()[1].pickup_requests().is_empty());
}

#[test]
fn pickup_just_ahead_joins_the_trip() {
    let mut fleet = Fleet::new(10, 1, SECOND).unwrap();
    let mut clock = Clock::new();

    fleet.submit_request(0, 6, 1, clock.now()).unwrap();
    clock.tick(&mut fleet);
    clock.tick(&mut fleet);
    let car = &fleet.cars()[0];
    assert_eq!((car.floor(), car.direction(), car.drop_floors()), (2, Direction::Up, vec![6]));

    fleet.submit_request(3, 5, 1, clock.now()).unwrap();
    clock.tick(&mut fleet);
    let car = &fleet.cars()[0];
    assert_eq!(car.floor(), 3);
    assert_eq!(car.drop_floors(), vec![6, 3]);
    assert_eq!(car.load(), 1);

    let events = clock.tick(&mut fleet);
    assert_eq!(
        events,
        vec![CarEvent::PassengerPickedUp { car_id: 0, floor: 3, destination: 5, party_size: 1 }]
    );
    assert_eq!(fleet.cars()[0].load(), 2);

    let mut drops = Vec::new();
    while !fleet.is_idle() {
        for event in clock.tick(&mut fleet) {
            if let CarEvent::PassengerDropped { floor, .. } = event {
                drops.push(floor);
            }
        }
    }
    assert_eq!(drops, vec![5, 6]);
    assert_eq!(fleet.cars()[0].load(), 0);
}

#[test]
fn car_that_has_passed_the_origin_is_skipped() {
    let mut fleet = Fleet::new(10, 2, SECOND).unwrap();
    let mut clock = Clock::new();

    fleet.submit_request(0, 9, 1, clock.now()).unwrap();
    for _ in 0..6 {
        clock.tick(&mut fleet);
    }
    assert_eq!(fleet.cars()[0].floor(), 6);

    // car 0 is closer but already above floor 4
    let assignment = fleet.submit_request(4, 8, 1, clock.now()).unwrap();
    assert_eq!(assignment.car_id, 1);
}

#[test]
fn bad_requests_leave_the_fleet_untouched() {
    let mut fleet = Fleet::new(10, 2, SECOND).unwrap();

    assert!(matches!(
        fleet.submit_request(10, 2, 1, Duration::ZERO),
        Err(Error::InvalidFloor { floor: 10, num_floors: 10 })
    ));
    assert!(matches!(fleet.submit_request(4, 4, 1, Duration::ZERO), Err(Error::TrivialRequest { floor: 4 })));
    assert!(matches!(fleet.submit_request(1, 4, 0, Duration::ZERO), Err(Error::InvalidPartySize)));

    assert!(fleet.is_idle());
    assert!(fleet.tick_all(SECOND).is_empty());
    // nothing was accepted, so the fleet can still be rebuilt
    fleet.configure(4, 1).unwrap();
}
