use std::collections::HashSet;

use crate::models::{Listing, MatchResult, Profile, ScoreBreakdown, ScoringWeights};

/// Fraction of the academic weight awarded when the candidate is within
/// 0.3 CGPA points below the requirement.
const ACADEMIC_CLOSE_FACTOR: f64 = 0.6;
/// Fraction awarded when the candidate misses the requirement outright.
const ACADEMIC_MISS_FACTOR: f64 = 0.25;
/// Fraction of the location weight awarded with no location match.
const LOCATION_MISS_FACTOR: f64 = 0.4;
/// Fraction of the industry weight awarded with no industry match.
const INDUSTRY_MISS_FACTOR: f64 = 1.0 / 3.0;
/// Fraction of the salary weight awarded outside the expected range.
const SALARY_MISS_FACTOR: f64 = 0.4;

/// Number of overlapping skills cited in the skill-match reason.
const MAX_CITED_SKILLS: usize = 3;

/// Compatibility scorer for (profile, listing) pairings
///
/// Scoring formula (default weights):
/// ```text
/// score = skill_ratio * 40        # shared / required skills
///       + academic_score          # 20 / 12 / 5 against the CGPA threshold
///       + location_score          # 20 on a location or remote match, 8 otherwise
///       + industry_score          # 15 on an industry match, 5 otherwise
///       + salary_score            # 5 within expectations, 2 otherwise
/// ```
#[derive(Debug, Clone)]
pub struct Scorer {
    weights: ScoringWeights,
}

impl Scorer {
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    pub fn with_default_weights() -> Self {
        Self {
            weights: ScoringWeights::default(),
        }
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    /// Score one profile against one listing.
    ///
    /// Pure and deterministic: identical inputs always produce identical
    /// output. The total is the sum of the five weighted sub-scores, capped
    /// at 100; a validated weight table cannot exceed the cap.
    pub fn score(&self, profile: &Profile, listing: &Listing) -> MatchResult {
        let mut reasons = Vec::new();

        let (skills, overlap) = skill_score(profile, listing, self.weights.skills);
        if !overlap.is_empty() {
            let cited: Vec<&str> = overlap
                .iter()
                .take(MAX_CITED_SKILLS)
                .map(String::as_str)
                .collect();
            reasons.push(format!("Strong skill match: {}", cited.join(", ")));
        }

        let (academic, academic_reason) =
            academic_score(profile.cgpa, listing.min_cgpa, self.weights.academic);
        if let Some(reason) = academic_reason {
            reasons.push(reason);
        }

        let (location, location_reason) = location_score(profile, listing, self.weights.location);
        if let Some(reason) = location_reason {
            reasons.push(reason.to_string());
        }

        let (industry, industry_reason) = industry_score(profile, listing, self.weights.industry);
        if let Some(reason) = industry_reason {
            reasons.push(reason.to_string());
        }

        let (salary, salary_reason) = salary_score(profile, listing, self.weights.salary);
        if let Some(reason) = salary_reason {
            reasons.push(reason.to_string());
        }

        let total = (skills + academic + location + industry + salary).min(100.0);

        MatchResult {
            profile_id: profile.id.clone(),
            listing_id: listing.id.clone(),
            score: total,
            breakdown: ScoreBreakdown {
                skills,
                academic,
                location,
                industry,
                salary,
            },
            skill_overlap: overlap,
            reasons,
        }
    }

    /// Rank catalog listings for one profile.
    ///
    /// Results are sorted by descending score; the sort is stable, so ties
    /// keep catalog order. Listings scoring below `min_score` are dropped
    /// before ranking.
    pub fn rank(
        &self,
        profile: &Profile,
        listings: &[Listing],
        limit: usize,
        min_score: Option<f64>,
    ) -> Vec<MatchResult> {
        let mut results: Vec<MatchResult> = listings
            .iter()
            .map(|listing| self.score(profile, listing))
            .filter(|result| min_score.map_or(true, |floor| result.score >= floor))
            .collect();

        results.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        results.truncate(limit);
        results
    }
}

impl Default for Scorer {
    fn default() -> Self {
        Self::with_default_weights()
    }
}

/// Skill sub-score: share of the listing's required skills the candidate
/// covers, scaled by the skill weight.
///
/// Returns the lower-cased overlap in required-skill order. An empty
/// required set scores 0 rather than dividing by zero.
#[inline]
fn skill_score(profile: &Profile, listing: &Listing, weight: f64) -> (f64, Vec<String>) {
    let have: HashSet<String> = profile.skills.iter().map(|s| s.to_lowercase()).collect();

    let mut required = HashSet::new();
    let mut overlap = Vec::new();
    for skill in &listing.required_skills {
        let lower = skill.to_lowercase();
        if have.contains(&lower) && !overlap.contains(&lower) {
            overlap.push(lower.clone());
        }
        required.insert(lower);
    }

    if required.is_empty() {
        return (0.0, overlap);
    }

    let ratio = overlap.len() as f64 / required.len() as f64;
    (ratio * weight, overlap)
}

/// Academic sub-score against the listing's CGPA threshold.
///
/// Meeting the threshold earns the full weight; the reason text
/// distinguishes clearing it by 0.5 points from just meeting it. Falling
/// short by up to 0.3 earns a reduced award, anything further a token one.
#[inline]
fn academic_score(have: f64, required: f64, weight: f64) -> (f64, Option<String>) {
    if have >= required {
        let reason = if have >= required + 0.5 {
            format!("Exceeds CGPA requirement ({} > {})", have, required)
        } else {
            format!("Meets CGPA requirement ({} >= {})", have, required)
        };
        (weight, Some(reason))
    } else if required - have <= 0.3 {
        (
            weight * ACADEMIC_CLOSE_FACTOR,
            Some(format!("Close to CGPA requirement ({} vs {})", have, required)),
        )
    } else {
        (weight * ACADEMIC_MISS_FACTOR, None)
    }
}

/// Location sub-score: a preferred location appearing in the listing's
/// location string earns the full weight, as does a remote preference
/// against a remote-eligible listing.
#[inline]
fn location_score(profile: &Profile, listing: &Listing, weight: f64) -> (f64, Option<&'static str>) {
    let listing_location = listing.location.to_lowercase();

    if profile
        .preferred_locations
        .iter()
        .any(|loc| listing_location.contains(&loc.to_lowercase()))
    {
        return (weight, Some("Matches location preference"));
    }

    let wants_remote = profile
        .preferred_locations
        .iter()
        .any(|loc| loc.eq_ignore_ascii_case("remote"));
    if wants_remote && listing.is_remote {
        return (weight, Some("Matches remote work preference"));
    }

    (weight * LOCATION_MISS_FACTOR, None)
}

/// Industry sub-score: substring match in either direction, case-insensitive.
#[inline]
fn industry_score(profile: &Profile, listing: &Listing, weight: f64) -> (f64, Option<&'static str>) {
    let mine = profile.industry.to_lowercase();
    let theirs = listing.industry.to_lowercase();

    if mine.contains(&theirs) || theirs.contains(&mine) {
        (weight, Some("Perfect industry match"))
    } else {
        (weight * INDUSTRY_MISS_FACTOR, None)
    }
}

/// Salary sub-score: listing salary inside the candidate's expected range.
#[inline]
fn salary_score(profile: &Profile, listing: &Listing, weight: f64) -> (f64, Option<&'static str>) {
    if profile.salary_within_expectations(listing.salary) {
        (weight, Some("Within salary expectations"))
    } else {
        (weight * SALARY_MISS_FACTOR, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SalaryRange;

    fn create_test_profile(skills: &[&str], cgpa: f64) -> Profile {
        Profile {
            id: "p1".to_string(),
            name: "Test Candidate".to_string(),
            skills: skills.iter().map(|s| s.to_string()).collect(),
            cgpa,
            industry: "Technology".to_string(),
            preferred_locations: vec!["Remote".to_string()],
            salary_range: Some(SalaryRange {
                min: 20000,
                max: 50000,
            }),
            work_mode: None,
        }
    }

    fn create_test_listing(required: &[&str], min_cgpa: f64) -> Listing {
        Listing {
            id: "l1".to_string(),
            title: "Software Intern".to_string(),
            company: "Acme".to_string(),
            location: "Bangalore".to_string(),
            industry: "Technology".to_string(),
            salary: 30000,
            is_remote: true,
            required_skills: required.iter().map(|s| s.to_string()).collect(),
            min_cgpa,
            capacity: None,
            filled: 0,
        }
    }

    #[test]
    fn test_worked_example() {
        let scorer = Scorer::with_default_weights();
        let profile = create_test_profile(&["Python", "React"], 8.0);
        let listing = create_test_listing(&["Python", "React", "SQL"], 7.0);

        let result = scorer.score(&profile, &listing);

        // 2/3 * 40 + 20 + 20 + 15 + 5
        assert!((result.breakdown.skills - 80.0 / 3.0).abs() < 1e-9);
        assert_eq!(result.breakdown.academic, 20.0);
        assert_eq!(result.breakdown.location, 20.0);
        assert_eq!(result.breakdown.industry, 15.0);
        assert_eq!(result.breakdown.salary, 5.0);
        assert!((result.score - 260.0 / 3.0).abs() < 1e-9);
        assert_eq!(result.skill_overlap, vec!["python", "react"]);
    }

    #[test]
    fn test_empty_required_skills_scores_zero() {
        let scorer = Scorer::with_default_weights();
        let profile = create_test_profile(&["Python"], 8.0);
        let listing = create_test_listing(&[], 7.0);

        let result = scorer.score(&profile, &listing);

        assert_eq!(result.breakdown.skills, 0.0);
        assert!(result.skill_overlap.is_empty());
    }

    #[test]
    fn test_empty_profile_skills_scores_zero() {
        let scorer = Scorer::with_default_weights();
        let profile = create_test_profile(&[], 8.0);
        let listing = create_test_listing(&["Java"], 7.0);

        let result = scorer.score(&profile, &listing);

        assert_eq!(result.breakdown.skills, 0.0);
        // Everything else can still award at most 60 under default weights.
        assert!(result.score <= 60.0);
    }

    #[test]
    fn test_skill_matching_is_case_insensitive() {
        let scorer = Scorer::with_default_weights();
        let profile = create_test_profile(&["PYTHON", "react"], 8.0);
        let listing = create_test_listing(&["Python", "React"], 7.0);

        let result = scorer.score(&profile, &listing);

        assert_eq!(result.breakdown.skills, 40.0);
        assert_eq!(result.skill_overlap, vec!["python", "react"]);
    }

    #[test]
    fn test_skill_reason_cites_at_most_three() {
        let scorer = Scorer::with_default_weights();
        let profile = create_test_profile(&["A", "B", "C", "D"], 8.0);
        let listing = create_test_listing(&["A", "B", "C", "D"], 7.0);

        let result = scorer.score(&profile, &listing);

        let reason = result
            .reasons
            .iter()
            .find(|r| r.starts_with("Strong skill match"))
            .expect("skill reason present");
        assert_eq!(reason, "Strong skill match: a, b, c");
    }

    #[test]
    fn test_academic_bands() {
        // Clears by 0.5 or more: full award, "exceeds" reason.
        let (score, reason) = academic_score(8.0, 7.0, 20.0);
        assert_eq!(score, 20.0);
        assert!(reason.unwrap().starts_with("Exceeds"));

        // Meets but does not clear by 0.5: still the full award.
        let (score, reason) = academic_score(7.2, 7.0, 20.0);
        assert_eq!(score, 20.0);
        assert!(reason.unwrap().starts_with("Meets"));

        // Within 0.3 below the threshold.
        let (score, reason) = academic_score(6.8, 7.0, 20.0);
        assert!((score - 12.0).abs() < 1e-9);
        assert!(reason.unwrap().starts_with("Close"));

        // Further below: token award, no reason.
        let (score, reason) = academic_score(6.0, 7.0, 20.0);
        assert_eq!(score, 5.0);
        assert!(reason.is_none());
    }

    #[test]
    fn test_location_substring_match() {
        let scorer = Scorer::with_default_weights();
        let mut profile = create_test_profile(&[], 8.0);
        profile.preferred_locations = vec!["Bangalore".to_string()];
        let listing = create_test_listing(&[], 7.0);

        let result = scorer.score(&profile, &listing);
        assert_eq!(result.breakdown.location, 20.0);
        assert!(result
            .reasons
            .contains(&"Matches location preference".to_string()));
    }

    #[test]
    fn test_remote_preference_matches_remote_listing() {
        let scorer = Scorer::with_default_weights();
        let profile = create_test_profile(&[], 8.0);
        let listing = create_test_listing(&[], 7.0);

        // Preferred "Remote" is not a substring of "Bangalore", but the
        // listing is remote-eligible.
        let result = scorer.score(&profile, &listing);
        assert_eq!(result.breakdown.location, 20.0);
        assert!(result
            .reasons
            .contains(&"Matches remote work preference".to_string()));
    }

    #[test]
    fn test_location_miss_awards_reduced_score() {
        let scorer = Scorer::with_default_weights();
        let mut profile = create_test_profile(&[], 8.0);
        profile.preferred_locations = vec!["Delhi".to_string()];
        let mut listing = create_test_listing(&[], 7.0);
        listing.is_remote = false;

        let result = scorer.score(&profile, &listing);
        assert_eq!(result.breakdown.location, 8.0);
    }

    #[test]
    fn test_industry_substring_both_directions() {
        let scorer = Scorer::with_default_weights();

        let mut profile = create_test_profile(&[], 8.0);
        profile.industry = "Tech".to_string();
        let listing = create_test_listing(&[], 7.0);
        let result = scorer.score(&profile, &listing);
        assert_eq!(result.breakdown.industry, 15.0);

        let mut profile = create_test_profile(&[], 8.0);
        profile.industry = "Finance".to_string();
        let result = scorer.score(&profile, &listing);
        assert_eq!(result.breakdown.industry, 5.0);
    }

    #[test]
    fn test_salary_outside_range() {
        let scorer = Scorer::with_default_weights();
        let mut profile = create_test_profile(&[], 8.0);
        profile.salary_range = Some(SalaryRange {
            min: 40000,
            max: 50000,
        });
        let listing = create_test_listing(&[], 7.0);

        let result = scorer.score(&profile, &listing);
        assert_eq!(result.breakdown.salary, 2.0);
    }

    #[test]
    fn test_score_is_deterministic() {
        let scorer = Scorer::with_default_weights();
        let profile = create_test_profile(&["Python", "SQL"], 7.4);
        let listing = create_test_listing(&["Python", "Java"], 7.5);

        let first = scorer.score(&profile, &listing);
        let second = scorer.score(&profile, &listing);

        assert_eq!(first.score, second.score);
        assert_eq!(first.reasons, second.reasons);
        assert_eq!(first.skill_overlap, second.skill_overlap);
    }

    #[test]
    fn test_rank_sorts_and_truncates() {
        let scorer = Scorer::with_default_weights();
        let profile = create_test_profile(&["Python", "React"], 8.0);

        let listings = vec![
            {
                let mut l = create_test_listing(&["Go"], 9.5);
                l.id = "weak".to_string();
                l.industry = "Finance".to_string();
                l
            },
            {
                let mut l = create_test_listing(&["Python", "React"], 7.0);
                l.id = "strong".to_string();
                l
            },
            {
                let mut l = create_test_listing(&["Python", "React", "SQL"], 7.0);
                l.id = "middle".to_string();
                l
            },
        ];

        let ranked = scorer.rank(&profile, &listings, 2, None);

        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].listing_id, "strong");
        assert_eq!(ranked[1].listing_id, "middle");
        assert!(ranked[0].score >= ranked[1].score);
    }

    #[test]
    fn test_rank_applies_score_floor() {
        let scorer = Scorer::with_default_weights();
        let profile = create_test_profile(&["Python", "React"], 8.0);
        let listings = vec![
            create_test_listing(&["Python", "React"], 7.0),
            {
                let mut l = create_test_listing(&["Go", "Rust"], 9.9);
                l.id = "l2".to_string();
                l.industry = "Finance".to_string();
                l
            },
        ];

        let ranked = scorer.rank(&profile, &listings, 10, Some(80.0));

        assert_eq!(ranked.len(), 1);
        assert!(ranked[0].score >= 80.0);
    }

    #[test]
    fn test_scores_stay_in_bounds() {
        let scorer = Scorer::with_default_weights();

        let profiles = [
            create_test_profile(&[], 0.0),
            create_test_profile(&["Python"], 10.0),
            create_test_profile(&["Python", "React", "SQL", "Go"], 5.5),
        ];
        let listings = [
            create_test_listing(&[], 0.0),
            create_test_listing(&["Python"], 10.0),
            create_test_listing(&["Python", "React", "SQL"], 6.5),
        ];

        for profile in &profiles {
            for listing in &listings {
                let result = scorer.score(profile, listing);
                assert!(result.score >= 0.0 && result.score <= 100.0);
            }
        }
    }

    #[test]
    fn test_adding_required_skill_never_lowers_skill_score() {
        let scorer = Scorer::with_default_weights();
        let listing = create_test_listing(&["Python", "React", "SQL"], 7.0);

        let before = scorer.score(&create_test_profile(&["Python"], 8.0), &listing);
        let after = scorer.score(&create_test_profile(&["Python", "SQL"], 8.0), &listing);

        assert!(after.breakdown.skills >= before.breakdown.skills);
    }
}
