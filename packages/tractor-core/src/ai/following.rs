//! Following strategy: classify the situation by suit availability and
//! route to one of a small set of decision paths. Position in the trick
//! (second, third, fourth) tilts the contest/duck decision.

use tracing::debug;

use crate::domain::cards::Card;
use crate::domain::combos::{self, ComboType};
use crate::domain::follow::cards_in_group;
use crate::domain::state::{partner, team_of, GameState, Seat};
use crate::domain::tricks::Trick;
use crate::domain::trump::EffectiveSuit;
use crate::error::EngineError;

use super::config::AiConfig;
use super::context::{GameContext, TrickPosition};
use super::memory::CardMemory;
use super::plays;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum FollowScenario {
    /// Enough cards in the led group to fill the lead's shapes.
    MatchStructure,
    /// Enough length in the group but the shapes cannot be filled.
    FragmentPairs,
    /// Some group cards, fewer than the lead length.
    ShortOfLength,
    /// No cards in the led group at all.
    VoidInLead,
    /// The lead itself is a multi-combo; obligations go component-wise.
    MultiComboLead,
}

pub fn classify(trick: &Trick, hand: &[Card], trump: &crate::domain::trump::TrumpInfo) -> FollowScenario {
    let in_group = cards_in_group(hand, trick.lead_group(), trump);
    if trick.lead_units().len() > 1 {
        return FollowScenario::MultiComboLead;
    }
    if in_group.is_empty() {
        return FollowScenario::VoidInLead;
    }
    if in_group.len() < trick.lead_len() {
        return FollowScenario::ShortOfLength;
    }
    if !plays::structured_plays(&in_group, trick.lead_units(), trump).is_empty() {
        return FollowScenario::MatchStructure;
    }
    FollowScenario::FragmentPairs
}

pub fn choose_follow(
    state: &GameState,
    seat: Seat,
    ctx: &GameContext,
    memory: &CardMemory,
    config: &AiConfig,
) -> Result<Vec<Card>, EngineError> {
    let trick = state
        .current_trick
        .as_ref()
        .ok_or_else(|| EngineError::invalid_state("follow requested with no trick"))?;
    let hand = state.hand(seat)?;

    let scenario = classify(trick, hand, &state.trump);
    debug!(seat, ?scenario, "follow scenario");

    let play = match scenario {
        FollowScenario::MatchStructure => {
            follow_matching(state, seat, trick, hand, ctx, memory, config)
        }
        FollowScenario::FragmentPairs => {
            follow_fragment(state, seat, trick, hand, ctx, config)
        }
        FollowScenario::ShortOfLength => follow_short(state, trick, hand),
        FollowScenario::VoidInLead => follow_void(state, seat, trick, hand, ctx, config),
        FollowScenario::MultiComboLead => {
            follow_multi_combo(state, seat, trick, hand, ctx, config)
        }
    };

    if play.len() != trick.lead_len() {
        return Err(EngineError::NoLegalPlay);
    }
    Ok(play)
}

/// How much sway the second seat has over the trick, judged from what the
/// two unseen seats behind it can still answer with.
#[derive(Debug, Copy, Clone, Eq, PartialEq, PartialOrd, Ord)]
pub enum InfluenceLevel {
    Low,
    Moderate,
    High,
}

/// Second-seat read: one dead seat behind is moderate influence, both dead
/// is high.
pub fn second_seat_influence(seat: Seat, trick: &Trick, memory: &CardMemory) -> InfluenceLevel {
    let lead_suit = match trick.lead_group() {
        EffectiveSuit::Suit(s) => Some(s),
        EffectiveSuit::Trump => None,
    };
    let dead_seats = upcoming_seats(seat, trick)
        .into_iter()
        .filter(|&s| {
            let suit_dead = lead_suit.map(|suit| memory.is_void(s, suit)).unwrap_or(false);
            suit_dead || memory.trump_exhaustion(s) > 0.7
        })
        .count();
    match dead_seats {
        0 => InfluenceLevel::Low,
        1 => InfluenceLevel::Moderate,
        _ => InfluenceLevel::High,
    }
}

fn upcoming_seats(seat: Seat, trick: &Trick) -> Vec<Seat> {
    let played: Vec<Seat> = trick.plays().iter().map(|p| p.seat).collect();
    (0..4u8)
        .filter(|s| !played.contains(s) && *s != seat)
        .collect()
}

/// How hard this position wants to press a winnable trick beyond the
/// baseline analysis.
fn position_wants_press(
    seat: Seat,
    trick: &Trick,
    ctx: &GameContext,
    memory: &CardMemory,
) -> bool {
    let lead_suit = match trick.lead_group() {
        EffectiveSuit::Suit(s) => Some(s),
        EffectiveSuit::Trump => None,
    };

    match ctx.trick_position {
        TrickPosition::Leading => false,
        // Second seat presses only with high influence over the outcome.
        TrickPosition::Second => {
            second_seat_influence(seat, trick, memory) == InfluenceLevel::High
        }
        // Third seat: taking over is low-risk when only an exhausted
        // opponent plays after us.
        TrickPosition::Third => upcoming_seats(seat, trick).iter().all(|&s| {
            if team_of(s) == team_of(seat) {
                return true;
            }
            let suit_dead = lead_suit.map(|suit| memory.is_void(s, suit)).unwrap_or(false);
            (suit_dead && memory.trump_exhaustion(s) > 0.7) || memory.is_trump_void(s)
        }),
        // Fourth seat sees everything: any winnable points are worth it.
        TrickPosition::Fourth => trick.points() > 0,
    }
}

fn follow_matching(
    state: &GameState,
    seat: Seat,
    trick: &Trick,
    hand: &[Card],
    ctx: &GameContext,
    memory: &CardMemory,
    config: &AiConfig,
) -> Vec<Card> {
    let trump = &state.trump;
    let in_group = cards_in_group(hand, trick.lead_group(), trump);
    let candidates = plays::structured_plays(&in_group, trick.lead_units(), trump);
    let analysis = ctx.trick_winner.as_ref();

    let try_to_beat = analysis.map(|a| a.should_try_to_beat).unwrap_or(false)
        || (analysis
            .map(|a| a.is_opponent_winning && a.can_beat_current_winner)
            .unwrap_or(false)
            && position_wants_press(seat, trick, ctx, memory));

    if try_to_beat {
        if let Some(play) = plays::minimal_beating_play(trick, seat, hand, trump) {
            return play;
        }
    }

    let teammate_winning = analysis.map(|a| a.is_teammate_winning).unwrap_or(false);
    let secure = analysis.map(|a| a.should_play_conservatively).unwrap_or(false);
    let fourth = ctx.trick_position == TrickPosition::Fourth;
    if teammate_winning && (secure || fourth) && config.legacy_teammate_contribution {
        // Feed the trick: the structured play with the most points.
        if let Some(best) = candidates.iter().max_by_key(|cards| {
            cards.iter().map(|c| c.points()).sum::<u16>()
        }) {
            if best.iter().map(|c| c.points()).sum::<u16>() > 0 {
                return best.clone();
            }
        }
    }

    // Default: the cheapest structured play that doesn't ship points.
    cheapest_play(candidates, trump)
}

fn follow_fragment(
    state: &GameState,
    _seat: Seat,
    trick: &Trick,
    hand: &[Card],
    ctx: &GameContext,
    config: &AiConfig,
) -> Vec<Card> {
    let trump = &state.trump;
    let in_group = cards_in_group(hand, trick.lead_group(), trump);
    let n = trick.lead_len();

    // Pair obligation first: every group pair the lead demands.
    let lead_pairs = trick.lead_units().iter().map(|u| u.pair_count()).sum::<usize>();
    let mut group_pairs: Vec<[Card; 2]> = Vec::new();
    let mut rest: Vec<Card> = Vec::new();
    collect_pairs(&in_group, &mut group_pairs, &mut rest);
    group_pairs.sort_by_key(|p| plays::conservation_value(&p[0], trump));

    let mut play: Vec<Card> = Vec::new();
    for pair in group_pairs.iter().take(lead_pairs) {
        play.extend_from_slice(pair);
    }
    for pair in group_pairs.iter().skip(lead_pairs) {
        rest.extend_from_slice(pair);
    }

    let teammate_winning = ctx
        .trick_winner
        .as_ref()
        .map(|a| a.is_teammate_winning)
        .unwrap_or(false);
    let fillers = if teammate_winning && config.legacy_teammate_contribution {
        plays::point_contribution_order(&rest)
    } else {
        // Non-point singles from the bottom, point cards only when forced.
        plays::disposal_cards(&rest, rest.len(), trump)
    };
    play.extend(fillers.into_iter().take(n - play.len()));
    play
}

fn follow_short(state: &GameState, trick: &Trick, hand: &[Card]) -> Vec<Card> {
    let trump = &state.trump;
    let mut play = cards_in_group(hand, trick.lead_group(), trump);
    let off_group: Vec<Card> = hand
        .iter()
        .filter(|c| trump.effective_suit(c) != trick.lead_group())
        .copied()
        .collect();
    let need = trick.lead_len() - play.len();
    play.extend(plays::disposal_cards(&off_group, need, trump));
    play
}

fn follow_void(
    state: &GameState,
    seat: Seat,
    trick: &Trick,
    hand: &[Card],
    ctx: &GameContext,
    config: &AiConfig,
) -> Vec<Card> {
    let trump = &state.trump;
    let n = trick.lead_len();
    let analysis = ctx.trick_winner.as_ref();

    let opponent_on_points = analysis
        .map(|a| a.is_opponent_winning && a.trick_points >= 10)
        .unwrap_or(false);
    if opponent_on_points {
        if let Some(play) = plays::minimal_beating_play(trick, seat, hand, trump) {
            return play;
        }
    }

    let teammate_winning = analysis.map(|a| a.is_teammate_winning).unwrap_or(false);
    if teammate_winning && config.legacy_teammate_contribution {
        let by_points = plays::point_contribution_order(hand);
        if by_points[0].is_point_card() {
            let mut play: Vec<Card> = by_points.iter().take_while(|c| c.is_point_card()).take(n).copied().collect();
            if play.len() < n {
                let rest: Vec<Card> = hand
                    .iter()
                    .filter(|c| !play.contains(c))
                    .copied()
                    .collect();
                play.extend(plays::disposal_cards(&rest, n - play.len(), trump));
            }
            return play;
        }
    }

    plays::disposal_cards(hand, n, trump)
}

fn follow_multi_combo(
    state: &GameState,
    seat: Seat,
    trick: &Trick,
    hand: &[Card],
    ctx: &GameContext,
    config: &AiConfig,
) -> Vec<Card> {
    let trump = &state.trump;
    let n = trick.lead_len();
    let mut remaining = cards_in_group(hand, trick.lead_group(), trump);
    let mut play: Vec<Card> = Vec::new();

    // A void hand can still trump the whole spread when it is worth it.
    let opponent_on_points = ctx
        .trick_winner
        .as_ref()
        .map(|a| a.is_opponent_winning && a.trick_points >= 10)
        .unwrap_or(false);
    if remaining.is_empty() && opponent_on_points {
        if let Some(over) = plays::minimal_beating_play(trick, seat, hand, trump) {
            return over;
        }
    }

    let teammate_led = team_of(trick.lead_play().seat) == team_of(seat)
        && trick.lead_play().seat == partner(seat);
    let contribute = teammate_led && config.legacy_teammate_contribution;

    // Components in priority order: tractors, then pairs, then singles.
    for unit in trick.lead_units() {
        if play.len() >= n || remaining.is_empty() {
            break;
        }
        match unit.kind {
            ComboType::Tractor => {
                let tractors: Vec<_> = combos::enumerate_combos(&remaining, trump)
                    .into_iter()
                    .filter(|c| c.kind == ComboType::Tractor && c.len() == unit.len())
                    .collect();
                if let Some(chosen) = pick_unit(tractors, contribute, trump) {
                    take_cards(&mut remaining, &mut play, &chosen.cards);
                }
            }
            ComboType::Pair => {
                let pairs: Vec<_> = combos::enumerate_combos(&remaining, trump)
                    .into_iter()
                    .filter(|c| c.kind == ComboType::Pair)
                    .collect();
                if let Some(chosen) = pick_unit(pairs, contribute, trump) {
                    take_cards(&mut remaining, &mut play, &chosen.cards);
                }
            }
            _ => {}
        }
    }

    // The pair obligation holds across components: however the units were
    // served, the play must still carry every pair the hand can supply, up
    // to what the lead demands.
    let in_group = cards_in_group(hand, trick.lead_group(), trump);
    let lead_pairs: usize = trick.lead_units().iter().map(|u| u.pair_count()).sum();
    let owed_pairs = lead_pairs.min(combos::count_pairs(&in_group));
    while combos::count_pairs(&play) < owed_pairs && play.len() + 2 <= n {
        let pairs: Vec<_> = combos::enumerate_combos(&remaining, trump)
            .into_iter()
            .filter(|c| c.kind == ComboType::Pair)
            .collect();
        match pick_unit(pairs, contribute, trump) {
            Some(pair) => take_cards(&mut remaining, &mut play, &pair.cards),
            None => break,
        }
    }

    // Remaining group cards fill the singles obligations.
    let fillers = if contribute {
        plays::point_contribution_order(&remaining)
    } else {
        plays::disposal_cards(&remaining, remaining.len(), trump)
    };
    for card in fillers {
        if play.len() >= n {
            break;
        }
        play.push(card);
    }

    // Off-group disposal for whatever length is still owed.
    if play.len() < n {
        let off_group: Vec<Card> = hand
            .iter()
            .filter(|c| state.trump.effective_suit(c) != trick.lead_group())
            .copied()
            .collect();
        play.extend(plays::disposal_cards(&off_group, n - play.len(), trump));
    }

    play
}

fn pick_unit(
    mut options: Vec<combos::Combo>,
    contribute: bool,
    trump: &crate::domain::trump::TrumpInfo,
) -> Option<combos::Combo> {
    if contribute {
        options.sort_by_key(|c| std::cmp::Reverse(c.points()));
    } else {
        options.sort_by_key(|c| {
            c.cards
                .iter()
                .map(|card| plays::conservation_value(card, trump))
                .sum::<u32>()
        });
    }
    options.into_iter().next()
}

fn take_cards(remaining: &mut Vec<Card>, play: &mut Vec<Card>, cards: &[Card]) {
    for card in cards {
        if let Some(idx) = remaining.iter().position(|c| c == card) {
            remaining.remove(idx);
            play.push(*card);
        }
    }
}

fn collect_pairs(cards: &[Card], pairs: &mut Vec<[Card; 2]>, rest: &mut Vec<Card>) {
    let mut pool = cards.to_vec();
    while let Some(card) = pool.pop() {
        if let Some(idx) = pool.iter().position(|c| c.is_pair_with(&card)) {
            let mate = pool.remove(idx);
            pairs.push([card, mate]);
        } else {
            rest.push(card);
        }
    }
}

fn cheapest_play(candidates: Vec<Vec<Card>>, trump: &crate::domain::trump::TrumpInfo) -> Vec<Card> {
    candidates
        .into_iter()
        .min_by_key(|cards| {
            let points = cards.iter().map(|c| c.points()).sum::<u16>() as u32;
            let value = cards
                .iter()
                .map(|c| plays::conservation_value(c, trump))
                .sum::<u32>();
            points * 40 + value
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::context::build_context;
    use crate::domain::cards::{JokerKind, Rank, Suit};
    use crate::domain::state::{GamePhase, TeamId};
    use crate::domain::trump::TrumpInfo;

    fn c(suit: Suit, rank: Rank, deck: u8) -> Card {
        Card::regular(suit, rank, deck)
    }

    fn state_with_trick(trick: Trick, seat: Seat, hand: Vec<Card>) -> GameState {
        let mut state = GameState::new_round(1, TeamId::A, [Rank::Two, Rank::Two], 0);
        state.trump = trick.trump;
        state.phase = GamePhase::Playing;
        state.current_player = seat;
        state.current_trick = Some(trick);
        state.players[seat as usize].hand = hand;
        state
    }

    fn decide(state: &GameState, seat: Seat) -> Vec<Card> {
        let ctx = build_context(state, seat).unwrap();
        let memory = CardMemory::from_state(state);
        choose_follow(state, seat, &ctx, &memory, &AiConfig::default()).unwrap()
    }

    #[test]
    fn classifies_scenarios() {
        let t = TrumpInfo::with_suit(Rank::Two, Suit::Spades);
        let trick = Trick::lead(
            t,
            0,
            vec![c(Suit::Hearts, Rank::Nine, 0), c(Suit::Hearts, Rank::Nine, 1)],
        )
        .unwrap();

        let matching = vec![c(Suit::Hearts, Rank::Ten, 0), c(Suit::Hearts, Rank::Ten, 1)];
        assert_eq!(classify(&trick, &matching, &t), FollowScenario::MatchStructure);

        let fragment = vec![c(Suit::Hearts, Rank::Ten, 0), c(Suit::Hearts, Rank::Jack, 0)];
        assert_eq!(classify(&trick, &fragment, &t), FollowScenario::FragmentPairs);

        let short = vec![c(Suit::Hearts, Rank::Ten, 0), c(Suit::Clubs, Rank::Four, 0)];
        assert_eq!(classify(&trick, &short, &t), FollowScenario::ShortOfLength);

        let void = vec![c(Suit::Clubs, Rank::Four, 0), c(Suit::Diamonds, Rank::Nine, 0)];
        assert_eq!(classify(&trick, &void, &t), FollowScenario::VoidInLead);
    }

    #[test]
    fn beats_point_trick_with_minimal_winner() {
        // Opponent leads K♥ for ten points; the ace takes it.
        let t = TrumpInfo::with_suit(Rank::Two, Suit::Spades);
        let trick = Trick::lead(t, 0, vec![c(Suit::Hearts, Rank::King, 0)]).unwrap();
        let state = state_with_trick(
            trick,
            1,
            vec![c(Suit::Hearts, Rank::Ace, 0), c(Suit::Hearts, Rank::Three, 0)],
        );
        assert_eq!(decide(&state, 1), vec![c(Suit::Hearts, Rank::Ace, 0)]);
    }

    #[test]
    fn ducks_cheap_trick_with_low_card() {
        let t = TrumpInfo::with_suit(Rank::Two, Suit::Spades);
        let trick = Trick::lead(t, 0, vec![c(Suit::Hearts, Rank::Seven, 0)]).unwrap();
        let state = state_with_trick(
            trick,
            1,
            vec![c(Suit::Hearts, Rank::Ace, 0), c(Suit::Hearts, Rank::Three, 0)],
        );
        assert_eq!(decide(&state, 1), vec![c(Suit::Hearts, Rank::Three, 0)]);
    }

    #[test]
    fn contributes_points_when_partner_holds_the_trick() {
        // Seat 1 leads the ace of clubs, seat 2 follows low, seat 3 is the
        // leader's partner and feeds it a point card.
        let t = TrumpInfo::with_suit(Rank::Two, Suit::Spades);
        let mut trick = Trick::lead(t, 1, vec![c(Suit::Clubs, Rank::Ace, 0)]).unwrap();
        trick.add_play(2, vec![c(Suit::Clubs, Rank::Three, 0)]).unwrap();
        let state = state_with_trick(
            trick,
            3,
            vec![
                c(Suit::Clubs, Rank::King, 0),
                c(Suit::Clubs, Rank::Ten, 0),
                c(Suit::Clubs, Rank::Four, 0),
            ],
        );
        let play = decide(&state, 3);
        assert_eq!(play.len(), 1);
        assert!(play[0].is_point_card());
    }

    #[test]
    fn conservative_flag_keeps_points_back() {
        let t = TrumpInfo::with_suit(Rank::Two, Suit::Spades);
        let mut trick = Trick::lead(t, 1, vec![c(Suit::Clubs, Rank::Ace, 0)]).unwrap();
        trick.add_play(2, vec![c(Suit::Clubs, Rank::Three, 0)]).unwrap();
        let state = state_with_trick(
            trick,
            3,
            vec![
                c(Suit::Clubs, Rank::King, 0),
                c(Suit::Clubs, Rank::Ten, 0),
                c(Suit::Clubs, Rank::Four, 0),
            ],
        );
        let ctx = build_context(&state, 3).unwrap();
        let memory = CardMemory::from_state(&state);
        let config = AiConfig {
            legacy_teammate_contribution: false,
            ..AiConfig::default()
        };
        let play = choose_follow(&state, 3, &ctx, &memory, &config).unwrap();
        assert_eq!(play, vec![c(Suit::Clubs, Rank::Four, 0)]);
    }

    #[test]
    fn saves_big_trumps_when_trick_is_lost() {
        // Small joker led; the weakest trump goes, the off-suit trump rank
        // card stays home.
        let t = TrumpInfo::with_suit(Rank::Two, Suit::Spades);
        let trick = Trick::lead(t, 0, vec![Card::joker(JokerKind::Small, 0)]).unwrap();
        let state = state_with_trick(
            trick,
            1,
            vec![
                c(Suit::Spades, Rank::Three, 0),
                c(Suit::Hearts, Rank::Two, 0),
                c(Suit::Diamonds, Rank::Ace, 0),
            ],
        );
        assert_eq!(decide(&state, 1), vec![c(Suit::Spades, Rank::Three, 0)]);
    }

    #[test]
    fn void_seat_trumps_a_point_trick() {
        let t = TrumpInfo::with_suit(Rank::Two, Suit::Spades);
        let trick = Trick::lead(t, 0, vec![c(Suit::Hearts, Rank::Ten, 0)]).unwrap();
        let state = state_with_trick(
            trick,
            1,
            vec![c(Suit::Spades, Rank::Four, 0), c(Suit::Clubs, Rank::Six, 0)],
        );
        assert_eq!(decide(&state, 1), vec![c(Suit::Spades, Rank::Four, 0)]);
    }

    #[test]
    fn void_seat_discards_lowest_on_empty_trick() {
        let t = TrumpInfo::with_suit(Rank::Two, Suit::Spades);
        let trick = Trick::lead(t, 0, vec![c(Suit::Hearts, Rank::Seven, 0)]).unwrap();
        let state = state_with_trick(
            trick,
            1,
            vec![c(Suit::Spades, Rank::Ace, 0), c(Suit::Clubs, Rank::Six, 0)],
        );
        assert_eq!(decide(&state, 1), vec![c(Suit::Clubs, Rank::Six, 0)]);
    }

    #[test]
    fn short_hand_exhausts_group_and_fills_cheaply() {
        let t = TrumpInfo::new(Rank::Two);
        let trick = Trick::lead(
            t,
            0,
            vec![c(Suit::Diamonds, Rank::Eight, 0), c(Suit::Diamonds, Rank::Eight, 1)],
        )
        .unwrap();
        let state = state_with_trick(
            trick,
            1,
            vec![
                c(Suit::Diamonds, Rank::Ten, 0),
                c(Suit::Spades, Rank::Three, 0),
                c(Suit::Spades, Rank::Four, 0),
            ],
        );
        let play = decide(&state, 1);
        assert_eq!(play.len(), 2);
        assert!(play.contains(&c(Suit::Diamonds, Rank::Ten, 0)));
    }

    #[test]
    fn fragment_keeps_pair_and_fills_low() {
        let t = TrumpInfo::with_suit(Rank::Two, Suit::Spades);
        let trick = Trick::lead(
            t,
            0,
            vec![
                c(Suit::Hearts, Rank::Seven, 0),
                c(Suit::Hearts, Rank::Seven, 1),
                c(Suit::Hearts, Rank::Eight, 0),
                c(Suit::Hearts, Rank::Eight, 1),
            ],
        )
        .unwrap();
        let hand = vec![
            c(Suit::Hearts, Rank::Queen, 0),
            c(Suit::Hearts, Rank::Queen, 1),
            c(Suit::Hearts, Rank::Four, 0),
            c(Suit::Hearts, Rank::Nine, 0),
            c(Suit::Hearts, Rank::King, 0),
        ];
        let state = state_with_trick(trick, 1, hand);
        let play = decide(&state, 1);
        assert_eq!(play.len(), 4);
        // The queen pair travels together; the king stays home.
        assert!(play.contains(&c(Suit::Hearts, Rank::Queen, 0)));
        assert!(play.contains(&c(Suit::Hearts, Rank::Queen, 1)));
        assert!(!play.contains(&c(Suit::Hearts, Rank::King, 0)));
    }

    #[test]
    fn multi_combo_follow_honors_component_order() {
        let t = TrumpInfo::with_suit(Rank::Two, Suit::Spades);
        // Lead: A♥ single + 9♥9♥ pair (unbeatable check bypassed by
        // building the trick directly).
        let trick = Trick::lead(
            t,
            0,
            vec![
                c(Suit::Hearts, Rank::Ace, 0),
                c(Suit::Hearts, Rank::Nine, 0),
                c(Suit::Hearts, Rank::Nine, 1),
            ],
        )
        .unwrap();
        let hand = vec![
            c(Suit::Hearts, Rank::Six, 0),
            c(Suit::Hearts, Rank::Six, 1),
            c(Suit::Hearts, Rank::Jack, 0),
            c(Suit::Clubs, Rank::Five, 0),
        ];
        let state = state_with_trick(trick, 1, hand);
        let play = decide(&state, 1);
        assert_eq!(play.len(), 3);
        // The pair obligation is met from the sixes.
        assert!(play.contains(&c(Suit::Hearts, Rank::Six, 0)));
        assert!(play.contains(&c(Suit::Hearts, Rank::Six, 1)));
    }
}
